use time::macros::format_description;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::EnvFilter;

/// Installs the stderr subscriber. `RUST_LOG` overrides the verbosity flag.
pub fn setup_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "error" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let timer = LocalTime::new(format_description!(
        "[hour]:[minute]:[second].[subsecond digits:3]"
    ));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(timer)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn format_number(num: u64) -> String {
    let digits = num.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Masks the host part of a dotted-quad address, keeping the first two octets.
pub fn redact_address(address: &str) -> String {
    let parts: Vec<&str> = address.split('.').collect();
    if parts.len() != 4 {
        return "*".repeat(address.len());
    }

    let masked: Vec<String> = parts[2..].iter().map(|part| "*".repeat(part.len())).collect();
    format!("{}.{}.{}", parts[0], parts[1], masked.join("."))
}

pub fn validate_args(args: &crate::args::Args) -> anyhow::Result<()> {
    if args.top == 0 {
        anyhow::bail!("--top must be greater than 0");
    }

    if let Some(bottom) = args.bottom {
        if bottom == 0 {
            anyhow::bail!("--bottom must be greater than 0");
        }
    }

    if let Some(workers) = args.workers {
        if workers == 0 {
            anyhow::bail!("--workers must be greater than 0");
        }
    }

    Ok(())
}
