//! 交互式命令行前端
//!
//! 逐行读取命令，分派给各个编排器，并在每条命令之后渲染状态。
//! 同一时刻只执行一条命令，状态由 `App` 独占持有。

use anyhow::Result;
use async_trait::async_trait;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::clients::HttpDocumentClient;
use crate::config::Config;
use crate::infrastructure::{accepted_extensions, DropZone, FilePicker};
use crate::models::DocumentId;
use crate::orchestrator::{
    refresh, AlwaysConfirm, Confirm, DeleteOrchestrator, QuestionOrchestrator, UploadOrchestrator,
};
use crate::utils::logging::log_startup;
use crate::workflow::{AppState, QuestionMode};

type SharedInput = Arc<Mutex<Lines<BufReader<Stdin>>>>;

/// 用户命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    /// 通过文件选择器上传（按扩展名过滤）
    Upload(Vec<PathBuf>),
    /// 通过拖放上传（不过滤）
    Drop(Vec<PathBuf>),
    Select(String),
    Mode(QuestionMode),
    Ask(String),
    Delete(String),
    Status,
    Help,
    Quit,
}

/// 解析一行输入，空行返回 `Ok(None)`
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    let paths = || -> Vec<PathBuf> { rest.split_whitespace().map(PathBuf::from).collect() };
    let require = |what: &str| -> Result<String, String> {
        if rest.is_empty() {
            Err(format!("用法: {} <{}>", head, what))
        } else {
            Ok(rest.to_string())
        }
    };

    let command = match head.to_ascii_lowercase().as_str() {
        "list" | "ls" => Command::List,
        "upload" => Command::Upload(paths()),
        "drop" => Command::Drop(paths()),
        "select" | "sel" => Command::Select(require("id|#序号")?),
        "mode" => Command::Mode(require("single|cross-check")?.parse()?),
        // 问题原样发送，空问题交给编排器校验
        "ask" => Command::Ask(rest.to_string()),
        "delete" | "rm" => Command::Delete(require("id|#序号")?),
        "status" => Command::Status,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("未知命令: {}（输入 help 查看帮助）", other)),
    };
    Ok(Some(command))
}

/// 从标准输入读取 y/N 的确认
struct StdinConfirm {
    input: SharedInput,
}

#[async_trait]
impl Confirm for StdinConfirm {
    async fn confirm(&self, prompt: &str) -> bool {
        print!("{} (y/N) ", prompt);
        let _ = std::io::stdout().flush();

        let mut input = self.input.lock().await;
        match input.next_line().await {
            Ok(Some(answer)) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            _ => false,
        }
    }
}

/// 应用主结构
pub struct App {
    config: Config,
    client: HttpDocumentClient,
    state: AppState,
    drop_zone: DropZone,
    input: SharedInput,
}

impl App {
    /// 初始化应用：创建客户端、检查服务、拉取文档列表
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let client = HttpDocumentClient::new(&config)?;
        match client.health().await {
            Ok(health) => info!(
                "✓ 服务状态: {} (版本 {})",
                health.status,
                health.version.as_deref().unwrap_or("未知")
            ),
            Err(e) => warn!("⚠️ 健康检查失败: {}", e),
        }

        let mut state = AppState::new(&config);
        refresh(&client, &mut state).await;

        Ok(Self {
            config,
            client,
            state,
            drop_zone: DropZone::new(),
            input: Arc::new(Mutex::new(BufReader::new(tokio::io::stdin()).lines())),
        })
    }

    /// 运行命令循环，直到 quit 或输入结束
    pub async fn run(mut self) -> Result<()> {
        print_help();
        self.render_documents();

        loop {
            print!("[{}]> ", self.state.mode);
            std::io::stdout().flush()?;

            let line = {
                let mut input = self.input.lock().await;
                input.next_line().await?
            };
            let Some(line) = line else { break };

            match parse_command(&line) {
                Ok(None) => continue,
                Ok(Some(Command::Quit)) => break,
                Ok(Some(command)) => self.dispatch(command).await,
                Err(msg) => println!("{}", msg),
            }
        }

        info!("👋 退出");
        Ok(())
    }

    async fn dispatch(&mut self, command: Command) {
        match command {
            Command::List => {
                self.state.status.clear_messages();
                refresh(&self.client, &mut self.state).await;
                self.render_documents();
            }
            Command::Upload(paths) => match FilePicker::pick(&paths).await {
                Ok(files) => {
                    UploadOrchestrator::new(&self.client).run(&mut self.state, files).await;
                    self.render_documents();
                }
                Err(e) => self.state.status.reject(e.to_string()),
            },
            Command::Drop(paths) => {
                self.drop_zone.drag_over();
                match self.drop_zone.drop(&paths).await {
                    Ok(files) => {
                        UploadOrchestrator::new(&self.client).run(&mut self.state, files).await;
                        self.render_documents();
                    }
                    Err(e) => self.state.status.reject(e.to_string()),
                }
            }
            Command::Select(reference) => match self.resolve(&reference) {
                Some(id) => {
                    self.state.select(id);
                    self.render_documents();
                }
                None => println!("找不到文档: {}", reference),
            },
            Command::Mode(mode) => {
                self.state.set_mode(mode);
                println!("提问模式: {}（{}）", mode, mode.hint());
            }
            Command::Ask(question) => {
                if !self.state.can_ask(&question) {
                    debug!("提问条件未满足，交给编排器校验");
                }
                let _ = QuestionOrchestrator::new(&self.client)
                    .run(&mut self.state, &question)
                    .await;
                self.render_answer();
            }
            Command::Delete(reference) => match self.resolve(&reference) {
                Some(id) => {
                    let stdin_confirm = StdinConfirm {
                        input: self.input.clone(),
                    };
                    let confirm: &dyn Confirm = if self.config.confirm_deletes {
                        &stdin_confirm
                    } else {
                        &AlwaysConfirm
                    };
                    DeleteOrchestrator::new(&self.client, confirm)
                        .run(&mut self.state, &id)
                        .await;
                    self.render_documents();
                }
                None => println!("找不到文档: {}", reference),
            },
            Command::Status => self.render_documents(),
            Command::Help => print_help(),
            Command::Quit => {}
        }

        self.render_status();
    }

    /// `#n` 按列表序号（从 1 开始）解析，否则按文档 ID 在当前快照中查找
    fn resolve(&self, reference: &str) -> Option<DocumentId> {
        match reference.strip_prefix('#') {
            Some(n) => {
                let index: usize = n.parse().ok()?;
                self.state
                    .documents
                    .get(index.checked_sub(1)?)
                    .map(|d| d.id.clone())
            }
            None => {
                let id = DocumentId::new(reference);
                self.state.find_document(&id).map(|d| d.id.clone())
            }
        }
    }

    // ========== 渲染 ==========

    fn render_status(&self) {
        let status = self.state.status.snapshot();
        if let Some(error) = &status.error {
            println!("✗ {}", error);
        } else if let Some(success) = &status.success {
            println!("✓ {}", success);
        }
    }

    fn render_documents(&self) {
        let docs = &self.state.documents;
        println!("\nDocuments ({})", docs.len());
        if docs.is_empty() {
            println!("  No documents uploaded yet");
        }
        for (i, doc) in docs.iter().enumerate() {
            let mark = if self.state.selection.contains(&doc.id) { "[x]" } else { "[ ]" };
            let uploaded = doc
                .uploaded_at
                .map(|t| t.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| "-".to_string());
            println!(
                "  {} #{} {} [{}] {} (Uploaded: {})",
                mark,
                i + 1,
                doc.filename,
                doc.file_type.label(),
                doc.id,
                uploaded
            );
        }
        println!(
            "Selected Documents: {} | {}",
            self.state.selection.len(),
            self.state.mode.hint()
        );
    }

    fn render_answer(&self) {
        if let Some(answer) = &self.state.answer {
            println!("\nAnswer\n{}\n", answer);
        }
    }
}

fn print_help() {
    println!("命令:");
    println!("  list                       刷新并显示文档列表");
    println!("  upload <路径...>           上传文件（支持 {}）", accepted_extensions());
    println!("  drop <路径...>             拖放上传（不过滤扩展名）");
    println!("  select <id|#序号>          选中 / 切换文档");
    println!("  mode <single|cross-check>  切换提问模式");
    println!("  ask <问题>                 提问");
    println!("  delete <id|#序号>          删除文档");
    println!("  status                     显示当前状态");
    println!("  quit                       退出");
}
