//! Formats command implementation

use crate::domain::ImageFormat;
use clap::Args;

/// Arguments for the formats command
#[derive(Args, Debug)]
pub struct FormatsArgs {}

impl FormatsArgs {
    /// Print the supported image formats, one per line
    pub fn execute(&self) -> anyhow::Result<i32> {
        println!("supported format:");
        for format in ImageFormat::ALL {
            println!("{format}");
        }
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formats_succeeds() {
        assert_eq!(FormatsArgs {}.execute().unwrap(), 0);
    }
}
