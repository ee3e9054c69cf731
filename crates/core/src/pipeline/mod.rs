pub mod count_people_use_case;
