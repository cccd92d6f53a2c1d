use crate::error::{AcoError, AcoResult};

/// Engine parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct AcoParams {
    pub n_ants: usize,
    pub n_best: usize, // Ants depositing pheromone each iteration
    pub n_iterations: usize,
    pub decay: f64, // Retention factor, 1.0 = no evaporation
    pub alpha: f64, // Pheromone influence
    pub beta: f64,  // Distance influence
    pub convergence_threshold: f64,
    pub convergence_patience: usize,
    pub parallel: bool,
    pub report_interval: usize, // 0 disables progress output
}

impl Default for AcoParams {
    fn default() -> Self {
        AcoParams {
            n_ants: 100,
            n_best: 10,
            n_iterations: 50,
            decay: 0.75,
            alpha: 1.0,
            beta: 1.0,
            convergence_threshold: 0.01,
            convergence_patience: 5,
            parallel: false,
            report_interval: 0,
        }
    }
}

impl AcoParams {
    pub fn validate(&self) -> AcoResult<()> {
        if self.n_ants == 0 {
            return Err(AcoError::config("n_ants must be positive"));
        }
        if self.n_best == 0 {
            return Err(AcoError::config("n_best must be positive"));
        }
        if self.n_iterations == 0 {
            return Err(AcoError::config("n_iterations must be positive"));
        }
        if !(self.decay > 0.0 && self.decay <= 1.0) {
            return Err(AcoError::config(format!(
                "decay must be in (0, 1], got {}",
                self.decay
            )));
        }
        if !self.alpha.is_finite() || !self.beta.is_finite() {
            return Err(AcoError::config("alpha and beta must be finite"));
        }
        if !self.convergence_threshold.is_finite() {
            return Err(AcoError::config("convergence_threshold must be finite"));
        }
        if self.convergence_patience == 0 {
            return Err(AcoError::config("convergence_patience must be positive"));
        }
        Ok(())
    }

    /// `n_best` above `n_ants` is a soft misconfiguration.
    pub fn effective_n_best(&self) -> usize {
        self.n_best.min(self.n_ants)
    }
}

/// Command line configuration for the binary.
#[derive(Debug, Clone)]
pub struct Config {
    pub file_path: Option<String>,
    pub size: usize, // Node count of the generated demo matrix
    pub seed: Option<u64>,
    pub params: AcoParams,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            file_path: None,
            size: 80,
            seed: None,
            params: AcoParams {
                beta: 2.0,
                ..AcoParams::default()
            },
        }
    }
}

fn parse_value<T: std::str::FromStr>(
    args: &mut impl Iterator<Item = String>,
    missing: &'static str,
    invalid: &'static str,
) -> Result<T, &'static str> {
    args.next().ok_or(missing)?.parse().map_err(|_| invalid)
}

impl Config {
    pub fn build(mut args: impl Iterator<Item = String>) -> Result<Config, &'static str> {
        args.next();

        let mut config = Config::default();

        while let Some(arg) = args.next() {
            let params = &mut config.params;
            match arg.as_str() {
                "-n" | "--ants" => {
                    params.n_ants = parse_value(
                        &mut args,
                        "Missing value for --ants",
                        "Invalid number for --ants",
                    )?
                }
                "-k" | "--best" => {
                    params.n_best = parse_value(
                        &mut args,
                        "Missing value for --best",
                        "Invalid number for --best",
                    )?
                }
                "-i" | "--iters" => {
                    params.n_iterations = parse_value(
                        &mut args,
                        "Missing value for --iters",
                        "Invalid number for --iters",
                    )?
                }
                "-d" | "--decay" => {
                    params.decay = parse_value(
                        &mut args,
                        "Missing value for --decay",
                        "Invalid number for --decay",
                    )?
                }
                "-a" | "--alpha" => {
                    params.alpha = parse_value(
                        &mut args,
                        "Missing value for --alpha",
                        "Invalid number for --alpha",
                    )?
                }
                "-b" | "--beta" => {
                    params.beta = parse_value(
                        &mut args,
                        "Missing value for --beta",
                        "Invalid number for --beta",
                    )?
                }
                "-t" | "--threshold" => {
                    params.convergence_threshold = parse_value(
                        &mut args,
                        "Missing value for --threshold",
                        "Invalid number for --threshold",
                    )?
                }
                "-c" | "--patience" => {
                    params.convergence_patience = parse_value(
                        &mut args,
                        "Missing value for --patience",
                        "Invalid number for --patience",
                    )?
                }
                "-v" | "--report-every" => {
                    params.report_interval = parse_value(
                        &mut args,
                        "Missing value for --report-every",
                        "Invalid number for --report-every",
                    )?
                }
                "-p" | "--parallel" => params.parallel = true,
                "-s" | "--seed" => {
                    config.seed = Some(parse_value(
                        &mut args,
                        "Missing value for --seed",
                        "Invalid number for --seed",
                    )?)
                }
                "-z" | "--size" => {
                    config.size = parse_value(
                        &mut args,
                        "Missing value for --size",
                        "Invalid number for --size",
                    )?
                }
                _ if config.file_path.is_none() && !arg.starts_with('-') => {
                    config.file_path = Some(arg)
                }
                _ => return Err("Invalid option or unexpected argument"),
            }
        }

        Ok(config)
    }
}
