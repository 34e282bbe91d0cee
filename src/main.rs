use anyhow::Context;
use career_planner::utils::error::{ErrorCategory, ErrorSeverity, PlannerError};
use career_planner::utils::logger;
use career_planner::{available_names, global_loader, CliConfig, Session};
use clap::Parser;
use std::io::{self, Write};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting career-planner");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 驗證並合併配置
    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => fail(&e),
    };
    tracing::debug!("Resolved config: {:?}", config);

    // 載入職位目錄；失敗即中止
    let opened = Session::open(
        global_loader(),
        &config.catalog_path,
        config.session_options(),
    );
    let mut session = match opened {
        Ok(session) => session,
        Err(e) => fail(&e),
    };

    if cli.list {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        for name in available_names(session.catalog().roles()) {
            writeln!(out, "{}", name).context("failed to write role list")?;
        }
        return Ok(());
    }

    if let Some(role) = &cli.role {
        match session.respond(role) {
            Ok(Some(rendered)) => {
                print!("{}", rendered);
                io::stdout().flush().context("failed to flush output")?;
            }
            Ok(None) => tracing::info!("No role given, nothing to show"),
            Err(e) => fail(&e),
        }
        return Ok(());
    }

    let stdin = io::stdin();
    if let Err(e) = session.run(stdin.lock(), io::stdout().lock()) {
        fail(&e);
    }

    tracing::info!("Session ended");
    Ok(())
}

/// 輸出錯誤資訊並依嚴重程度結束程序
fn fail(e: &PlannerError) -> ! {
    // 記錄詳細錯誤信息
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    // 輸出用戶友好的錯誤信息
    eprintln!("❌ {}", e.user_friendly_message());
    if let Some(preview) = e.preview() {
        eprintln!("Start of file content being read (DEBUG):");
        eprintln!("{}", preview);
    }
    if e.category() == ErrorCategory::Source && !matches!(e, PlannerError::EmptyCatalog { .. }) {
        eprintln!("Could not load career data. Unable to proceed. Please check the JSON file format and path.");
    }
    eprintln!("💡 {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
