//! 交互式确认 - 业务能力层

use std::io::{self, BufRead, Write};

/// 询问是否继续，读到 EOF 视为拒绝
///
/// # 参数
/// - `input`: 输入流（通常是 stdin）
/// - `output`: 提示输出流（通常是 stdout）
/// - `prompt`: 提示文字
pub fn ask_confirmation<R: BufRead, W: Write>(mut input: R, mut output: W, prompt: &str) -> io::Result<bool> {
    write!(output, "{} (s/n): ", prompt)?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(is_affirmative(&answer))
}

/// "s"、"si"、"sí"、"y"、"yes"（不区分大小写）
pub fn is_affirmative(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "s" | "si" | "sí" | "y" | "yes"
    )
}
