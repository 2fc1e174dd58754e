use clap::{Parser, Subcommand};
use psychro_toolbox::resolver::{KnownProperties, KnownProperty};
use psychro_toolbox::{app, config, i18n, logging};

#[derive(Parser, Debug)]
#[command(name = "psychro_toolbox_cli")]
#[command(about = "Psychrometric state calculator and process classifier", long_about = None)]
struct Args {
    /// 언어 코드 (auto / en-us / ko-kr)
    #[arg(short = 'L', long, default_value = "auto")]
    lang: String,

    /// 디버그 로그 출력
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 상태점 하나를 계산해 출력한다
    Calc {
        /// 건구온도 [°F]
        #[arg(long)]
        tdb: Option<f64>,
        /// 습구온도 [°F]
        #[arg(long)]
        twb: Option<f64>,
        /// 상대습도 [% 또는 0~1]
        #[arg(long)]
        rh: Option<f64>,
        /// 이슬점 [°F]
        #[arg(long)]
        tdp: Option<f64>,
    },
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() {
    let args = Args::parse();
    logging::init_logger(logging::cli_filter(args.verbose));
    if let Err(err) = try_run(args) {
        tracing::error!(error = %err, "cli terminated");
        eprintln!("오류: {err}");
        std::process::exit(1);
    }
}

fn try_run(args: Args) -> Result<(), app::AppError> {
    let cfg = config::load_or_default()?;
    let lang = i18n::resolve_language(&args.lang, Some(cfg.language.as_str()));
    let tr = i18n::Translator::new_with_pack(&lang, cfg.language_pack_dir.as_deref());

    match args.command {
        None => app::run(&cfg, &tr),
        Some(Command::Calc { tdb, twb, rh, tdp }) => {
            let props = [
                (KnownProperty::DryBulb, tdb),
                (KnownProperty::WetBulb, twb),
                (KnownProperty::RelativeHumidity, rh),
                (KnownProperty::DewPoint, tdp),
            ]
            .into_iter()
            .filter_map(|(k, v)| v.map(|v| (k, v)))
            .fold(KnownProperties::new(), |acc, (k, v)| acc.with(k, v));
            app::calculate_once(&cfg, &tr, &props)
        }
    }
}
