//! プロンプト定義
//!
//! CLIとWeb(WASM)で同じ指示文を使う。

/// テキスト抽出の指示文
///
/// 抽出テキストのみを返させ、段落・箇条書き・表などのレイアウトは可能な限り保持させる。
pub const EXTRACTION_INSTRUCTION: &str = "画像に含まれるテキストをすべて抽出してください。\
段落・箇条書き・表などのレイアウトや構造はできるだけ元の見た目どおりに保持してください。\
説明や前置きは付けず、抽出したテキストのみを返してください。";

/// テキストが見つからなかったときの表示
pub const NO_TEXT_PLACEHOLDER: &str = "テキストは検出されませんでした。";
