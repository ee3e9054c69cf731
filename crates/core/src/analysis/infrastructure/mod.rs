pub mod http_people_counter;
