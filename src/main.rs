use clap::Parser;
use revenue_roi_engine::{app, config, ui_cli::Cli};

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 명령을 실행한다.
fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(err) = try_run(&cli) {
        eprintln!("오류: {err}");
        std::process::exit(1);
    }
}

fn try_run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::load_or_default(&cli.config)?;
    app::run(cli, &cfg)?;
    Ok(())
}
