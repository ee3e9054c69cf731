use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use people_counter_core::analysis::infrastructure::http_people_counter::HttpPeopleCounter;
use people_counter_core::pipeline::count_people_use_case::CountPeopleUseCase;
use people_counter_core::preview::domain::preview_loader::PreviewLoader;
use people_counter_core::preview::infrastructure::file_preview_loader::FilePreviewLoader;
use people_counter_core::shared::constants::{ANALYZE_ENDPOINT, IMAGE_EXTENSIONS};
use people_counter_core::shared::selected_file::SelectedFile;

/// Count the people in an image using a remote analysis service.
#[derive(Parser, Debug)]
#[command(name = "people-counter")]
struct Cli {
    /// Image file to analyze.
    input: PathBuf,

    /// Analysis endpoint receiving the multipart upload.
    #[arg(long, env = "PEOPLE_COUNTER_ENDPOINT", default_value = ANALYZE_ENDPOINT)]
    endpoint: String,

    /// Also print the image as a data URI.
    #[arg(long)]
    preview: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    if !is_image(&cli.input) {
        log::warn!(
            "{} does not look like an image; uploading anyway",
            cli.input.display()
        );
    }

    let counter = HttpPeopleCounter::new(&cli.endpoint)?;
    let preview_loader: Option<Box<dyn PreviewLoader>> = if cli.preview {
        Some(Box::new(FilePreviewLoader::new()))
    } else {
        None
    };

    let use_case = CountPeopleUseCase::new(Box::new(counter), preview_loader);
    let report = use_case.execute([SelectedFile::from_path(&cli.input)])?;

    if cli.preview {
        match report.preview {
            Some(preview) => println!("{preview}"),
            None => eprintln!("Preview unavailable"),
        }
    }
    println!("People Count: {}", report.people_count);
    Ok(())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.is_file() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }
    if !(cli.endpoint.starts_with("http://") || cli.endpoint.starts_with("https://")) {
        return Err(format!(
            "Endpoint must be an http:// or https:// URL, got '{}'",
            cli.endpoint
        )
        .into());
    }
    Ok(())
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("people-counter").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_endpoint_flag_overrides_default() {
        let cli = parse(&["photo.jpg", "--endpoint", "http://10.0.0.2:5000/analyze"]);
        assert_eq!(cli.endpoint, "http://10.0.0.2:5000/analyze");
        assert!(!cli.preview);
    }

    #[test]
    fn test_validate_rejects_missing_input() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing.jpg");
        let cli = parse(&[path.to_str().unwrap(), "--endpoint", ANALYZE_ENDPOINT]);
        let err = validate(&cli).unwrap_err();
        assert!(err.to_string().contains("Input file not found"));
    }

    #[test]
    fn test_validate_rejects_non_http_endpoint() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("photo.jpg");
        fs::write(&path, [0xFF, 0xD8]).unwrap();
        let cli = parse(&[path.to_str().unwrap(), "--endpoint", "ftp://host/analyze"]);
        assert!(validate(&cli).is_err());
    }

    #[test]
    fn test_validate_accepts_existing_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("photo.jpg");
        fs::write(&path, [0xFF, 0xD8]).unwrap();
        let cli = parse(&[path.to_str().unwrap(), "--preview", "--endpoint", ANALYZE_ENDPOINT]);
        assert!(validate(&cli).is_ok());
        assert!(cli.preview);
    }

    #[test]
    fn test_is_image() {
        assert!(is_image(Path::new("crowd.PNG")));
        assert!(!is_image(Path::new("notes.txt")));
        assert!(!is_image(Path::new("README")));
    }
}
