use std::path::PathBuf;
use std::sync::Once;

static TRACING: Once = Once::new();
static CONFIG: Once = Once::new();

#[allow(dead_code)]
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

#[allow(dead_code)]
pub fn ensure_test_config() {
    CONFIG.call_once(|| {
        let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
            .join("worldgen_small.json");

        debug_assert!(
            config_path.exists(),
            "missing test worldgen config at {}",
            config_path.display()
        );

        std::env::set_var(worldgen_core::config::CONFIG_PATH_ENV, &config_path);
    });
}
