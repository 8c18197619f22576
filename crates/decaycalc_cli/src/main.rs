//! Terminal front end for the decay calculator.
//!
//! # Responsibility
//! - Collect raw field strings from command-line flags.
//! - Print the string envelope returned by `decaycalc_core`.
//!
//! # Invariants
//! - No decay logic lives here; every value comes from the core service.
//! - Exit codes: 0 success, 1 calculation error, 2 usage error.

use decaycalc_core::{
    default_log_level, init_logging_with, parse::parse_timestamp, presets, CalculationResponse,
    DecayRequest, DecayService, LogConfig, Slot,
};
use log::info;
use std::process::ExitCode;

const DEFAULT_ISOTOPE: &str = "18-F";

const USAGE: &str = "\
usage: decaycalc [--list | --presets]
       decaycalc [--preset NAME] [--now DD-MM-YYYY HH:MM] [--isotope LABEL]
                 [--t0 TIME] [--t1 TIME] [--a0 ACTIVITY] [--a1 ACTIVITY]
                 [--json] [--log-dir DIR] [--log-level LEVEL]

Give exactly three of t0, t1, a0, a1; the fourth is solved.
Times use DD-MM-YYYY HH:MM. A preset fills the fields first; explicit
flags override it. --now only sets the clock for a preset and requires one.";

const EXIT_OK: u8 = 0;
const EXIT_CALCULATION_ERROR: u8 = 1;
const EXIT_USAGE_ERROR: u8 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    ListIsotopes,
    ListPresets,
    Calculate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliConfig {
    command: Command,
    preset: Option<String>,
    now: Option<String>,
    isotope: Option<String>,
    slots: Vec<(Slot, String)>,
    json: bool,
    log_dir: Option<String>,
    log_level: Option<String>,
}

impl CliConfig {
    fn parse<I>(args: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = CliConfig {
            command: Command::Calculate,
            preset: None,
            now: None,
            isotope: None,
            slots: Vec::new(),
            json: false,
            log_dir: None,
            log_level: None,
        };

        let mut args = args.into_iter();
        while let Some(flag) = args.next() {
            let mut value = |name: &str| {
                args.next()
                    .ok_or_else(|| format!("missing value for {name}"))
            };
            match flag.as_str() {
                "--list" => config.command = Command::ListIsotopes,
                "--presets" => config.command = Command::ListPresets,
                "--json" => config.json = true,
                "--preset" => config.preset = Some(value("--preset")?),
                "--now" => config.now = Some(value("--now")?),
                "--isotope" => config.isotope = Some(value("--isotope")?),
                "--t0" => config.slots.push((Slot::T0, value("--t0")?)),
                "--t1" => config.slots.push((Slot::T1, value("--t1")?)),
                "--a0" | "--A0" => config.slots.push((Slot::A0, value("--a0")?)),
                "--a1" | "--A1" => config.slots.push((Slot::A1, value("--a1")?)),
                "--log-dir" => config.log_dir = Some(value("--log-dir")?),
                "--log-level" => config.log_level = Some(value("--log-level")?),
                other => return Err(format!("unknown argument `{other}`")),
            }
        }
        if config.now.is_some() && config.preset.is_none() {
            return Err("--now requires --preset".to_string());
        }
        Ok(config)
    }

    fn log_config(&self) -> Result<Option<LogConfig>, String> {
        match &self.log_dir {
            Some(dir) => {
                let level = self.log_level.as_deref().unwrap_or(default_log_level());
                LogConfig::new(level, dir).map(Some)
            }
            None => LogConfig::from_env(),
        }
    }
}

fn main() -> ExitCode {
    let config = match CliConfig::parse(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("decaycalc: {err}\n\n{USAGE}");
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    match config.log_config().and_then(|log| match log {
        Some(log) => init_logging_with(log),
        None => Ok(()),
    }) {
        Ok(()) => {}
        Err(err) => {
            eprintln!("decaycalc: {err}");
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    }
    info!("event=cli_start module=cli status=ok command={:?}", config.command);

    let service = DecayService::builtin();
    let status = match config.command {
        Command::ListIsotopes => {
            for option in service.list_isotopes() {
                println!("{:<8} {}", option.label, option.halflife_text);
            }
            EXIT_OK
        }
        Command::ListPresets => {
            for preset in presets() {
                println!("{:<16} {}", preset.name, preset.isotope_label);
            }
            EXIT_OK
        }
        Command::Calculate => match build_request(&service, &config) {
            Ok(request) => {
                let response = service.calculate(&request);
                match render(&response, config.json) {
                    Ok(output) => {
                        print!("{}", output.stdout);
                        eprint!("{}", output.stderr);
                        exit_status(&response)
                    }
                    Err(err) => {
                        eprintln!("decaycalc: {err}");
                        EXIT_CALCULATION_ERROR
                    }
                }
            }
            Err(err) => {
                eprintln!("decaycalc: {err}");
                EXIT_USAGE_ERROR
            }
        },
    };
    ExitCode::from(status)
}

fn build_request(service: &DecayService<'_>, config: &CliConfig) -> Result<DecayRequest, String> {
    let mut request = match &config.preset {
        Some(name) => {
            let now = match &config.now {
                Some(raw) => parse_timestamp(raw)?,
                None => chrono::Local::now().naive_local(),
            };
            service
                .preset_request(name, now)
                .map_err(|err| err.to_string())?
        }
        None => DecayRequest {
            isotope: DEFAULT_ISOTOPE.to_string(),
            ..DecayRequest::default()
        },
    };
    if let Some(isotope) = &config.isotope {
        request.isotope = isotope.clone();
    }
    for (slot, value) in &config.slots {
        request.fields.set(*slot, value.as_str());
    }
    Ok(request)
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Rendered {
    stdout: String,
    stderr: String,
}

fn render(response: &CalculationResponse, json: bool) -> Result<Rendered, String> {
    let mut output = Rendered::default();
    if json {
        let text = serde_json::to_string_pretty(response)
            .map_err(|err| format!("failed to encode response: {err}"))?;
        output.stdout = format!("{text}\n");
        return Ok(output);
    }

    output.stdout.push_str(&format!("isotope  {}\n", response.isotope));
    for slot in Slot::ALL {
        let marker = match response.solved {
            Some(solved) if solved == slot => " *",
            _ => "",
        };
        output.stdout.push_str(&format!(
            "{:<8} {}{}\n",
            slot.as_str(),
            response.fields.get(slot),
            marker
        ));
    }
    if response.ok {
        output.stdout.push_str(&format!("delta    {}\n", response.elapsed));
        output.stdout.push_str(&format!("ratio    {}\n", response.ratio));
    } else {
        let flagged: Vec<&str> = response
            .statuses
            .iter()
            .filter(|report| report.flagged)
            .map(|report| report.slot.as_str())
            .collect();
        if !flagged.is_empty() {
            output.stderr.push_str(&format!("check    {}\n", flagged.join(", ")));
        }
        output.stderr.push_str(&format!("error    {}\n", response.message));
    }
    Ok(output)
}

fn exit_status(response: &CalculationResponse) -> u8 {
    if response.ok {
        EXIT_OK
    } else {
        EXIT_CALCULATION_ERROR
    }
}
