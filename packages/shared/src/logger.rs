//! Logging setup for the Irori binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the given default log level.
///
/// Both the library crates (`irori_server`, `irori_client`, `irori_shared`) and
/// the binary itself log at `default_log_level` unless `RUST_LOG` is set.
///
/// # Examples
///
/// ```no_run
/// use irori_shared::logger::setup_logger;
///
/// setup_logger("irori_server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the `EnvFilter` directive used when `RUST_LOG` is not set.
fn default_filter(binary_name: &str, level: &str) -> String {
    let binary = binary_name.replace('-', "_");
    format!(
        "irori_server={level},irori_client={level},irori_shared={level},irori={level},{binary}={level},tower_http={level}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_normalizes_binary_name() {
        // テスト項目: バイナリ名のハイフンがアンダースコアに変換される
        // given (前提条件):
        let binary_name = "irori-server";

        // when (操作):
        let filter = default_filter(binary_name, "info");

        // then (期待する結果):
        assert!(filter.contains("irori_server=info"));
        assert!(!filter.contains("irori-server"));
    }

    #[test]
    fn test_default_filter_includes_dead_letter_target() {
        // テスト項目: dead letter ログのターゲット（irori::dead_letter）が有効になる
        // given (前提条件):

        // when (操作):
        let filter = default_filter("irori_client", "warn");

        // then (期待する結果):
        assert!(filter.contains("irori=warn"));
        assert!(filter.contains("tower_http=warn"));
    }
}
