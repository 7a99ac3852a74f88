use std::io::{self, Read};
use std::str::FromStr;

/// Data to encode, taken from a clap argument. The value "-" reads the data
/// from stdin instead, and "\-" encodes a literal dash.
#[derive(Debug, Clone)]
pub struct DataInput(pub String);

impl FromStr for DataInput {
    type Err = io::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "-" => {
                let mut buffer = String::new();
                io::stdin().read_to_string(&mut buffer)?;
                Ok(DataInput(strip_line_ending(buffer)))
            }
            r"\-" => Ok(DataInput("-".to_string())),
            _ => Ok(DataInput(s.to_string())),
        }
    }
}

// Piped input almost always ends with a newline that nobody wants inside
// the symbol. Only one line ending is dropped.
fn strip_line_ending(mut buffer: String) -> String {
    if buffer.ends_with('\n') {
        buffer.pop();
        if buffer.ends_with('\r') {
            buffer.pop();
        }
    }
    buffer
}

impl AsRef<str> for DataInput {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DataInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_value() {
        let input: DataInput = "https://example.com".parse().unwrap();
        assert_eq!(input.as_ref(), "https://example.com");
    }

    #[test]
    fn test_escaped_dash() {
        let input: DataInput = r"\-".parse().unwrap();
        assert_eq!(input.as_ref(), "-");
    }

    #[test]
    fn test_strip_line_ending() {
        assert_eq!(strip_line_ending("hello\n".to_string()), "hello");
        assert_eq!(strip_line_ending("hello\r\n".to_string()), "hello");
        assert_eq!(strip_line_ending("hello\n\n".to_string()), "hello\n");
        assert_eq!(strip_line_ending("hello".to_string()), "hello");
    }
}
