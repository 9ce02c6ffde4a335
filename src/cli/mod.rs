pub(crate) mod batch;
pub(crate) mod sasa;

use protsasa::{parse_levels, Level, SasaError, SasaSettings};
use tracing::{debug, warn};

/// Build the rayon global pool. `0` lets rayon pick the thread count.
pub(crate) fn init_thread_pool(num_threads: usize) {
    if let Err(e) = rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
    {
        warn!("Could not configure the thread pool: {e}");
    }
    debug!("Using {} thread(s)", rayon::current_num_threads());
}

/// Map command line values onto validated [`SasaSettings`].
pub(crate) fn build_settings(
    probe_radius: f64,
    n_points: usize,
    levels: &str,
    num_threads: usize,
) -> Result<SasaSettings, SasaError> {
    let levels: Vec<Level> = parse_levels(levels)?;
    let settings = SasaSettings::default()
        .with_probe_radius(probe_radius)
        .with_sphere_points(n_points)
        .with_levels(&levels)
        .with_parallel(num_threads != 1);
    settings.validate()?;
    Ok(settings)
}
