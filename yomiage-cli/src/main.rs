use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use yomiage_core::ai::gemini::{GeminiConfig, GeminiProvider};
use yomiage_core::ai::tagger::SsmlTagger;
use yomiage_core::auth::Credentials;
use yomiage_core::narration;
use yomiage_core::tts::google::GoogleTts;
use yomiage_core::tts::types::Voice;

/// Fixed news story used when no text is supplied. The closing line marks it
/// as fictional demo content.
const NEWS_TEXT: &str = "海洋プラスチック問題に向けた画期的な新素材、静岡で開発。\
静岡県にある「未来環境研究所」は本日、植物由来の成分のみで作られた新しい生分解性プラスチック「アクアレス」を発表しました。\
この素材は、海水に触れると数ヶ月で自然に分解される特性を持っており、海洋汚染問題の解決に繋がるとして注目を集めています。\
開発チームを率いる田中博士によると、「アクアレス」は、海藻のゲル化成分に着想を得て、5年以上の歳月をかけて完成させました。\
製造プロセスにおいても、有害な化学物質を一切使用しないため、環境への負荷が極めて低いのが特徴です。\
この新素材は、特に食品包装や使い捨て容器への応用が期待されています。\
もし実用化されれば、現在世界的な課題となっている海洋プラスチックごみの削減に大きく貢献する可能性があります。\
研究所はすでに複数の国内メーカーと協力して試作品の生産を開始しており、来年には一部の製品で限定的な市場テストが行われる予定です。\
（このニュースは、テキスト読み上げのデモンストレーション用に作成された架空のものです。）";

#[derive(Parser, Debug)]
#[command(name = "yomiage")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generates four TTS narration variants of a Japanese text for comparison")]
struct Args {
    /// Path to the service account key file
    #[arg(long, default_value = "iam-key.json")]
    key_file: PathBuf,

    /// Directory to write the MP3 files into
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Narrate this text instead of the built-in news story
    #[arg(long)]
    text: Option<String>,

    /// Read the text to narrate from a file
    #[arg(long, conflicts_with = "text")]
    text_file: Option<PathBuf>,

    /// Generative model used for AI tagging
    #[arg(long, default_value = "gemini-2.5-flash")]
    model: String,

    /// Region for the generative model endpoint
    #[arg(long, default_value = "us-central1")]
    region: String,

    /// TTS voice name
    #[arg(long, default_value = "ja-JP-Wavenet-D")]
    voice: String,

    /// Skip the AI-tuned variant
    #[arg(long)]
    skip_ai: bool,
}

fn main() -> Result<()> {
    setup_tracing();

    // The whole run is sequential; a current-thread runtime is all we need.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

async fn async_main() -> Result<()> {
    let args = Args::parse();

    // Credentials gate everything: report and exit before any network call.
    let credentials = match Credentials::load(&args.key_file) {
        Ok(credentials) => credentials,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    info!(project_id = %credentials.project_id, "Credentials loaded");

    let text = match (&args.text, &args.text_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => NEWS_TEXT.to_string(),
    };

    let generator = GeminiProvider::new(
        credentials.clone(),
        GeminiConfig {
            model: args.model,
            region: args.region,
        },
    )
    .map_err(|e| anyhow::anyhow!("Failed to create generative model client: {e}"))?;
    let tagger = SsmlTagger::new(Arc::new(generator));

    let synthesizer = GoogleTts::new(credentials)?;
    let voice = Voice {
        name: args.voice,
        ..Voice::default()
    };

    std::fs::create_dir_all(&args.output_dir)?;

    narration::generate_comparison(
        &text,
        &tagger,
        &synthesizer,
        &voice,
        &args.output_dir,
        !args.skip_ai,
    )
    .await?;

    info!("All files generated");
    Ok(())
}

fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
}
