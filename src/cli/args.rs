use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lens")]
#[command(about = "Upload photos and ask an analysis backend to identify what is in them")]
#[command(version)]
pub struct Cli {
    /// Images to upload at startup
    pub images: Vec<PathBuf>,

    /// Analysis endpoint (overrides LENS_API_URL)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Instruction sent with every request (overrides LENS_PROMPT)
    #[arg(short, long)]
    pub prompt: Option<String>,

    /// Print rendered results without ANSI styling
    #[arg(long)]
    pub no_color: bool,

    /// Analyze the given images once and exit instead of starting the prompt
    #[arg(long, requires = "images")]
    pub once: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_images_and_flags() {
        let cli = Cli::parse_from(["lens", "--once", "-p", "What is this?", "a.jpg", "b.png"]);
        assert!(cli.once);
        assert_eq!(cli.prompt.as_deref(), Some("What is this?"));
        assert_eq!(cli.images, vec![PathBuf::from("a.jpg"), PathBuf::from("b.png")]);
        assert!(cli.api_url.is_none());
    }

    #[test]
    fn test_once_needs_images() {
        assert!(Cli::try_parse_from(["lens", "--once"]).is_err());
    }
}
