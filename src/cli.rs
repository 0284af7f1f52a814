use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "neuralynx")]
#[command(about = "画像からテキストを抽出するツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像ファイル/フォルダからテキストを抽出
    Extract {
        /// 画像ファイルまたはフォルダ
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// テキストの出力先フォルダ（デフォルト: 各画像と同じフォルダ）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 抽出テキストを標準出力にも表示
        #[arg(short, long)]
        print: bool,

        /// 全結果をJSONで保存
        #[arg(long)]
        json: Option<PathBuf>,

        /// サブフォルダも再帰的にスキャン
        #[arg(short = 'r', long)]
        recursive: bool,

        /// 使用するモデル（設定ファイルより優先）
        #[arg(short, long)]
        model: Option<String>,
    },

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// モデルを設定
        #[arg(long)]
        set_model: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
