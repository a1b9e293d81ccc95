use crate::config::Environment;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn default_directives(env: &Environment) -> &'static str {
    match env {
        Environment::Dev => "kazavel_backend=debug,tower_http=debug,info",
        Environment::Staging => "kazavel_backend=debug,tower_http=info,info",
        Environment::Prod => "kazavel_backend=info,tower_http=info,warn",
    }
}

pub fn init_logging(env: &Environment) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directives(env).into());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(env.is_dev())
        .with_line_number(env.is_dev());

    // JSON lines in production so the hosting log drain can index fields
    if env.is_prod() {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.pretty())
            .init();
    }

    tracing::info!("Logging initialized for {:?} environment", env);
}
