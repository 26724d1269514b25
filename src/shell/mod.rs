//! Interactive terminal front end.
//!
//! Reads lines from an async reader. Plain lines are typed into the input;
//! lines starting with `:` are commands mapped onto [`App`] actions. After
//! every action the whole screen is re-rendered to the writer.

use std::str::FromStr;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use crate::app::{App, Sample, Tab};
use crate::error::{AppError, AppResult};
use crate::views::render_app;

/// Help text listing the shell commands.
pub const HELP: &str = "\
直接输入文本即可追加到输入框。命令：
  :analyze            开始检测
  :clear              清空输入
  :example <1|2>      加载示例
  :tab <report|suggestions|history>
  :load <id>          查看历史分析详情
  :delete <id>        删除历史记录
  :show               重新显示
  :help               帮助
  :quit               退出
";

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// A line of text to append to the input.
    Input(String),
    /// `:analyze`
    Analyze,
    /// `:clear`
    Clear,
    /// `:example <1|2>`
    Example(Sample),
    /// `:tab <name>`
    Tab(Tab),
    /// `:load <id>`
    Load(String),
    /// `:delete <id>`
    Delete(String),
    /// `:show`
    Show,
    /// `:help`
    Help,
    /// `:quit`
    Quit,
}

impl FromStr for ShellCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let Some(command) = line.trim_start().strip_prefix(':') else {
            return Ok(ShellCommand::Input(line.to_string()));
        };

        let mut parts = command.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let arg = parts.next();

        let require_arg = |what: &str| {
            arg.map(str::to_string)
                .ok_or_else(|| format!(":{} requires {}", name, what))
        };

        match name {
            "analyze" | "a" => Ok(ShellCommand::Analyze),
            "clear" => Ok(ShellCommand::Clear),
            "example" | "e" => Ok(ShellCommand::Example(require_arg("1 or 2")?.parse()?)),
            "tab" | "t" => Ok(ShellCommand::Tab(require_arg("a tab name")?.parse()?)),
            "load" | "l" => Ok(ShellCommand::Load(require_arg("an entry id")?)),
            "delete" | "d" => Ok(ShellCommand::Delete(require_arg("an entry id")?)),
            "show" | "s" => Ok(ShellCommand::Show),
            "help" | "h" | "?" => Ok(ShellCommand::Help),
            "quit" | "q" | "exit" => Ok(ShellCommand::Quit),
            other => Err(format!("Unknown command: :{}", other)),
        }
    }
}

/// Whether the shell should keep reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Render,
    Quit,
}

/// Interactive shell over an [`App`].
pub struct Shell<'a> {
    app: &'a mut App,
}

impl<'a> Shell<'a> {
    /// Shell driving `app`
    pub fn new(app: &'a mut App) -> Self {
        Self { app }
    }

    /// Run until EOF or `:quit`.
    pub async fn run<R, W>(&mut self, reader: R, writer: &mut W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("Shell starting");
        let mut reader = reader;
        let mut line = String::new();

        writer.write_all(render_app(self.app).as_bytes()).await?;
        writer.flush().await?;

        loop {
            line.clear();
            let bytes_read = reader.read_line(&mut line).await?;

            // EOF reached
            if bytes_read == 0 {
                info!("EOF received, leaving shell");
                break;
            }

            let trimmed = line.trim_end_matches(['\r', '\n']);
            debug!(line = %trimmed, "Shell input");

            let status_before = self.app.status();
            let flow = match trimmed.parse::<ShellCommand>() {
                Ok(command) => match self.execute(command, writer).await {
                    Ok(flow) => flow,
                    Err(e) => {
                        write_line(writer, &format!("! {}", display_error(&e))).await?;
                        Flow::Continue
                    }
                },
                Err(message) => {
                    write_line(writer, &format!("! {}", message)).await?;
                    Flow::Continue
                }
            };

            // An edit that discards a result or error must not leave it on screen
            let flow = match flow {
                Flow::Continue if self.app.status() != status_before => Flow::Render,
                other => other,
            };

            match flow {
                Flow::Quit => break,
                Flow::Render => {
                    writer.write_all(b"\n").await?;
                    writer.write_all(render_app(self.app).as_bytes()).await?;
                }
                Flow::Continue => {}
            }
            writer.flush().await?;
        }

        info!("Shell finished");
        Ok(())
    }

    async fn execute<W>(&mut self, command: ShellCommand, writer: &mut W) -> AppResult<Flow>
    where
        W: AsyncWrite + Unpin,
    {
        match command {
            ShellCommand::Input(text) => {
                self.app.push_input_line(&text);
                Ok(Flow::Continue)
            }
            ShellCommand::Analyze => {
                if self.app.can_submit() {
                    write_line(writer, "正在分析...").await?;
                }
                self.app.submit().await?;
                Ok(Flow::Render)
            }
            ShellCommand::Clear => {
                self.app.set_input(String::new());
                Ok(Flow::Render)
            }
            ShellCommand::Example(sample) => {
                self.app.load_example(sample);
                Ok(Flow::Render)
            }
            ShellCommand::Tab(tab) => {
                self.app.select_tab(tab)?;
                Ok(Flow::Render)
            }
            ShellCommand::Load(id) => {
                self.app.load_history_entry(&id)?;
                Ok(Flow::Render)
            }
            ShellCommand::Delete(id) => {
                if !self.app.delete_history_entry(&id).await? {
                    write_line(writer, &format!("! History entry not found: {}", id)).await?;
                }
                Ok(Flow::Render)
            }
            ShellCommand::Show => Ok(Flow::Render),
            ShellCommand::Help => {
                writer.write_all(HELP.as_bytes()).await?;
                Ok(Flow::Continue)
            }
            ShellCommand::Quit => Ok(Flow::Quit),
        }
    }
}

fn display_error(err: &AppError) -> String {
    match err {
        AppError::Action(e) => e.to_string(),
        AppError::Analysis(e) => e.user_message().to_string(),
        other => other.to_string(),
    }
}

async fn write_line<W>(writer: &mut W, text: &str) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(text.as_bytes()).await?;
    writer.write_all(b"\n").await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_lines_are_input() {
        assert_eq!(
            "张三是经理".parse::<ShellCommand>().unwrap(),
            ShellCommand::Input("张三是经理".to_string())
        );
        assert_eq!(
            "".parse::<ShellCommand>().unwrap(),
            ShellCommand::Input(String::new())
        );
    }

    #[test]
    fn test_commands_parse() {
        assert_eq!(":analyze".parse::<ShellCommand>().unwrap(), ShellCommand::Analyze);
        assert_eq!(
            ":example 2".parse::<ShellCommand>().unwrap(),
            ShellCommand::Example(Sample::FamilyPlans)
        );
        assert_eq!(
            ":tab history".parse::<ShellCommand>().unwrap(),
            ShellCommand::Tab(Tab::History)
        );
        assert_eq!(
            "  :delete 1700000000000".parse::<ShellCommand>().unwrap(),
            ShellCommand::Delete("1700000000000".to_string())
        );
        assert_eq!(":q".parse::<ShellCommand>().unwrap(), ShellCommand::Quit);
    }

    #[test]
    fn test_bad_commands_are_errors() {
        assert!(":load".parse::<ShellCommand>().is_err());
        assert!(":example 9".parse::<ShellCommand>().is_err());
        assert!(":tab charts".parse::<ShellCommand>().is_err());
        assert!(":frobnicate".parse::<ShellCommand>().is_err());
    }
}
