use std::{
    fs::File,
    io::{self, BufWriter, Write},
};

use crate::{Result, SwarmOptions, tour::Route};

/// `Best Route: a -> b -> ... -> a` followed by `Best Cost: <cost>`.
pub fn render_route(route: &Route) -> String {
    let mut text = String::from("Best Route: ");
    for city in &route.order {
        text.push_str(&city.to_string());
        text.push_str(" -> ");
    }
    if let Some(first) = route.order.first() {
        text.push_str(&first.to_string());
    }

    let mut cost = ryu::Buffer::new();
    text.push_str("\nBest Cost: ");
    text.push_str(cost.format(route.cost));
    text.push('\n');
    text
}

/// Writes the rendered route to `--output`, or stdout when none is set.
pub fn write_route(route: &Route, options: &SwarmOptions) -> Result<()> {
    let text = render_route(route);
    match options.output_path() {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            writer.write_all(text.as_bytes())?;
            writer.flush()?;
            log::info!("output: wrote route to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            lock.write_all(text.as_bytes())?;
            lock.flush()?;
        }
    }
    Ok(())
}
