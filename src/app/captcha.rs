use crate::error::Result;
use std::io::Write;
use std::path::Path;

/// Supplies the solution of a captcha image written to disk.
pub trait CaptchaSolver {
    fn solve(&self, image: &Path) -> Result<String>;
}

impl<F> CaptchaSolver for F
where
    F: Fn(&Path) -> Result<String>,
{
    fn solve(&self, image: &Path) -> Result<String> {
        self(image)
    }
}

/// Asks the operator on stdin
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSolver;

impl CaptchaSolver for ConsoleSolver {
    fn solve(&self, image: &Path) -> Result<String> {
        print!("请输入验证码 ({}): ", image.display());
        std::io::stdout().flush()?;
        let mut captcha = String::new();
        std::io::stdin().read_line(&mut captcha)?;
        Ok(captcha.trim().to_string())
    }
}
