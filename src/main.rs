use std::time::Instant;

use log::info;
use rand::{SeedableRng, rngs::StdRng};

use pso_tsp_core::{CityInput, Optimizer, Result, SwarmOptions, logging, write_route};

fn main() -> Result<()> {
    let now = Instant::now();
    let options = SwarmOptions::from_args()?;
    logging::init_logger(&options)?;

    let mut rng = StdRng::seed_from_u64(options.seed);
    let input = CityInput::load(&options, &mut rng)?;

    info!("input: {input}");
    info!("options: {options}");

    let summary = Optimizer::new(input.cities(), &options, &mut rng)?.run();
    let route = summary.route();

    write_route(&route, &options)?;

    info!("summary: {summary}");
    info!(
        "output: n={} time={:.2}s",
        route.n(),
        now.elapsed().as_secs_f32()
    );

    route.route_metrics(input.cities());

    Ok(())
}
