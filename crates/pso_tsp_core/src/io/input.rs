use std::{fs, io::Read};

use pso_tsp_derive::KvDisplay;
use rand::Rng;

use crate::{
    City, Error, Result,
    constants::MIN_CITIES,
    options::{CitySource, SwarmOptions},
};

/// The fixed city set a run optimizes over.
#[derive(Clone, Debug, KvDisplay)]
pub struct CityInput {
    pub source: String,
    #[kv(name = "n", fmt = "len")]
    pub cities: Vec<City>,
}

impl CityInput {
    /// Generates or reads cities according to `--input`. Random cities draw from `rng`.
    pub fn load<R: Rng + ?Sized>(options: &SwarmOptions, rng: &mut R) -> Result<Self> {
        let (source, cities) = match options.city_source() {
            CitySource::Random(count) => (format!("random({count})"), generate_cities(count, rng)),
            CitySource::Stdin => {
                let mut text = String::new();
                std::io::stdin().read_to_string(&mut text)?;
                ("stdin".to_string(), parse_cities(&text)?)
            }
            CitySource::File(path) => {
                let text = fs::read_to_string(path).map_err(|e| {
                    Error::invalid_input(format!(
                        "failed to read city file {}: {e}",
                        path.display()
                    ))
                })?;
                (path.display().to_string(), parse_cities(&text)?)
            }
        };
        Self::new(source, cities)
    }

    pub fn new(source: impl Into<String>, cities: Vec<City>) -> Result<Self> {
        if cities.len() < MIN_CITIES {
            return Err(Error::invalid_input(format!(
                "at least {MIN_CITIES} cities are required, got {}",
                cities.len()
            )));
        }
        Ok(Self {
            source: source.into(),
            cities,
        })
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn n(&self) -> usize {
        self.cities.len()
    }
}

pub fn generate_cities<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<City> {
    (0..count).map(|_| City::random(rng)).collect()
}

fn parse_cities(input: &str) -> Result<Vec<City>> {
    let mut cities = Vec::new();
    for (idx, tok) in input.split_whitespace().enumerate() {
        let token = idx + 1;
        let mut it = tok.split(',');
        let x_s = it
            .next()
            .ok_or_else(|| Error::invalid_data(format!("Token {token}: missing x")))?;
        let y_s = it
            .next()
            .ok_or_else(|| Error::invalid_data(format!("Token {token}: missing y")))?;

        if it.next().is_some() {
            return Err(Error::invalid_data(format!(
                "Token {token}: expected 'x,y' but got extra comma fields: {tok}"
            )));
        }

        let x: i32 = x_s
            .trim()
            .parse()
            .map_err(|_| Error::invalid_data(format!("Token {token}: invalid x: {x_s}")))?;
        let y: i32 = y_s
            .trim()
            .parse()
            .map_err(|_| Error::invalid_data(format!("Token {token}: invalid y: {y_s}")))?;

        cities.push(City::new(x, y));
    }

    Ok(cities)
}
