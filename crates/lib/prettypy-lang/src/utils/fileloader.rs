use std::io::Read;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IoError: {0}")]
    IoError(#[from] std::io::Error),
    #[error("File {path} not found: {message}", path = path.display())]
    FileNotFound { message: String, path: PathBuf },
    #[error("Failed to convert into UTF: {0}")]
    UtfConversionError(#[from] std::string::FromUtf8Error),
}

pub fn load(path: &str) -> Result<String, Error> {
    let content = std::fs::read(path).map_err(|e| Error::FileNotFound {
        message: e.to_string(),
        path: PathBuf::from(path),
    })?;
    let content_r = String::from_utf8(content).map_err(Error::from)?;
    Ok(content_r)
}

pub fn load_stdin() -> Result<String, Error> {
    let mut content = Vec::new();
    std::io::stdin().read_to_end(&mut content)?;
    let content_r = String::from_utf8(content).map_err(Error::from)?;
    Ok(content_r)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn missing_file() {
        let err = load("/nonexistent/prettypy/input.json").expect_err("should be an error");
        assert!(matches!(err, Error::FileNotFound { .. }));
        assert!(err.to_string().contains("/nonexistent/prettypy/input.json"));
    }

    #[test]
    fn load_file() {
        let path = std::env::temp_dir().join(format!(
            "prettypy_fileloader_test_{}.json",
            std::process::id()
        ));
        std::fs::write(&path, "{\"body\": []}").unwrap();
        let res = load(&path.to_string_lossy()).unwrap();
        assert_eq!(res, "{\"body\": []}");
        let _ = std::fs::remove_file(path);
    }
}
