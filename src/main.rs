use anyhow::Context;
use clap::Parser;
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use neuralynx::{cli, config, error, export, extractor, scanner};
use neuralynx_common::{process_submission, Error as ExtractionError, ResultStore, Submission};
use std::cell::RefCell;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::{Cli, Commands};
use config::Config;
use extractor::HttpExtractor;
use scanner::ImageInfo;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load().context("設定ファイルを読み込めません")?;

    match cli.command {
        Commands::Extract {
            paths,
            output,
            print,
            json,
            recursive,
            model,
        } => {
            println!("🔍 neuralynx - テキスト抽出\n");

            let inputs = scanner::scan_paths(&paths, recursive)?;
            if inputs.is_empty() {
                let shown = paths
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                return Err(error::NeuralynxError::NoImagesFound(shown).into());
            }

            let extractor = HttpExtractor::new(config.extractor_config(model.as_deref()));
            if let Err(e) = extractor.config() {
                eprintln!("⚠ {}", e);
            }

            let store = RefCell::new(ResultStore::new());
            let outcomes = extract_all(&store, &extractor, &inputs).await;
            let store = store.into_inner();

            let mut exports = export::ExportSession::new();
            for (input, outcome) in inputs.iter().zip(&outcomes) {
                let id = match outcome {
                    Ok(id) => *id,
                    Err(e) => {
                        println!("- {}: スキップ（{}）", input.file_name, e);
                        continue;
                    }
                };
                let Some(record) = store.get(id) else {
                    continue;
                };

                println!("{}", export::summary_line(record));
                let path = export::export_path(&input.path, &record.file_name, output.as_deref());
                if let Some(path) = exports
                    .write(record, &path)
                    .with_context(|| format!("書き出しに失敗: {}", path.display()))?
                {
                    println!("  → {}", path.display());
                }
                if print {
                    if let Some(text) = record.completed_text() {
                        println!("{}\n", text);
                    }
                }
            }

            if let Some(json_path) = json {
                export::write_json(store.records(), &json_path)?;
                println!("\n✔ JSON出力: {}", json_path.display());
            }

            let counts = store.counts();
            println!(
                "\n✅ 完了 {}件 / エラー {}件 / 出力 {}ファイル",
                counts.completed,
                counts.error,
                exports.written_count()
            );
        }

        Commands::Config {
            set_api_key,
            set_model,
            show,
        } => {
            let mut config = config;
            let mut changed = false;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                changed = true;
                println!("✔ APIキーを設定しました");
            }

            if let Some(model) = set_model {
                println!("✔ モデルを設定しました: {}", model);
                config.model = model;
                changed = true;
            }

            if changed {
                config.save().context("設定ファイルを保存できません")?;
            }

            if show || !changed {
                print_config(&config, &Config::config_path()?);
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        "neuralynx=debug,neuralynx_common=debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

/// 全画像のパイプラインを同時に進める（単一スレッド上で交互に実行）
async fn extract_all(
    store: &RefCell<ResultStore>,
    extractor: &HttpExtractor,
    inputs: &[ImageInfo],
) -> Vec<neuralynx_common::Result<neuralynx_common::RecordId>> {
    let progress = ProgressBar::new(inputs.len() as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        progress.set_style(style.progress_chars("█▓▒░  "));
    }
    progress.set_message("テキストを解析中...");

    let tasks = inputs.iter().map(|input| {
        let progress = &progress;
        async move {
            let submission = Submission {
                file_name: input.file_name.clone(),
                mime_type: input.mime_type.clone(),
                image_source: input.path.display().to_string(),
                timestamp: chrono::Utc::now().timestamp_millis(),
            };
            let outcome =
                process_submission(store, extractor, submission, read_image(&input.path)).await;
            progress.inc(1);
            outcome
        }
    });

    let outcomes = join_all(tasks).await;
    progress.finish_and_clear();
    outcomes
}

async fn read_image(path: &Path) -> neuralynx_common::Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .map_err(|e| ExtractionError::BufferRead(format!("{}: {}", path.display(), e)))
}

fn print_config(config: &Config, path: &Path) {
    let key_status = match (config.api_key(), config.api_key.is_some()) {
        (None, _) => "未設定",
        (Some(_), true) => "設定済み",
        (Some(_), false) => "設定済み（環境変数）",
    };

    println!("設定:");
    println!("  ファイル: {}", path.display());
    println!("  モデル: {}", config.model);
    println!("  APIキー: {}", key_status);
}
