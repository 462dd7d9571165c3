use clap::Args;
use tempo_core::context::AppConfig;
use tempo_core::counter::TimeCounter;
use tempo_core::timer::{TimerConfig, TimerSettings, TimerStatus};
use tempo_types::{Precision, TimeInput, TimerPreset};

use crate::context::CliContext;

/// Run options shared by `start` and `save-preset`
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// seconds, minutes or hours
    #[arg(short, long)]
    pub precision: Option<Precision>,
    #[arg(short, long)]
    pub countdown: bool,
    /// Start values as `seconds,minutes,hours`
    #[arg(short, long)]
    pub start: Option<String>,
    /// Target as `seconds,minutes,hours`
    #[arg(short, long)]
    pub target: Option<String>,
}

impl RunArgs {
    /// Apply the explicitly given options over `base`
    pub fn apply(&self, mut base: TimerPreset) -> Result<TimerPreset, String> {
        if let Some(precision) = self.precision {
            base.precision = precision;
        }
        if self.countdown {
            base.countdown = true;
        }
        if let Some(start) = &self.start {
            base.start_values = Some(parse_time(start)?);
        }
        if let Some(target) = &self.target {
            base.target = Some(parse_time(target)?);
        }
        Ok(base)
    }
}

fn parse_time(input: &str) -> Result<TimeInput, String> {
    TimeInput::from_input(input).map_err(|e| format!("invalid time '{input}': {e}"))
}

/// Preset built from the configured defaults
fn default_preset(config: &AppConfig) -> TimerPreset {
    TimerPreset {
        precision: config.default_precision,
        countdown: config.default_countdown,
        ..Default::default()
    }
}

fn format_time(input: Option<&TimeInput>) -> String {
    match input.map(TimeCounter::normalize) {
        None => "-".to_string(),
        Some(Ok(values)) => values.to_string(),
        Some(Err(_)) => "invalid".to_string(),
    }
}

fn mode(countdown: bool) -> &'static str {
    if countdown { "countdown" } else { "regular" }
}

pub fn start(ctx: &CliContext, preset: Option<&str>, args: &RunArgs) -> Result<(), String> {
    let preset = {
        let config = ctx.config.borrow();
        let base = match preset {
            Some(name) => config.preset(name).map_err(|e| e.to_string())?.clone(),
            None => default_preset(&config),
        };
        args.apply(base)?
    };

    ctx.timer
        .start(TimerConfig::from(&preset))
        .map_err(|e| e.to_string())?;

    if !ctx.timer.is_running() {
        println!("start values already equal the target, timer not started");
    }
    Ok(())
}

pub fn stop(ctx: &CliContext) -> Result<(), String> {
    let was_running = ctx.timer.is_running();
    ctx.timer.stop();
    if was_running {
        println!("stopped at {}", ctx.timer.time_values());
    } else {
        println!("timer is not running");
    }
    Ok(())
}

pub fn status(ctx: &CliContext) -> Result<(), String> {
    let settings = ctx.timer.config();
    let totals = ctx.timer.total_time_values();
    let status = match ctx.timer.status() {
        TimerStatus::Idle => "idle",
        TimerStatus::Running => "running",
        TimerStatus::Stopped => "stopped",
    };

    println!("{:<10} {status}", "status:");
    println!(
        "{:<10} {} ({})",
        "precision:",
        settings.precision,
        mode(settings.countdown)
    );
    println!("{:<10} {}", "time:", ctx.timer.time_values());
    println!(
        "{:<10} {}s / {}m / {}h",
        "totals:", totals.seconds, totals.minutes, totals.hours
    );
    match settings.target {
        Some(target) => println!("{:<10} {target}", "target:"),
        None => println!("{:<10} none", "target:"),
    }
    Ok(())
}

pub fn show_config(ctx: &CliContext) -> Result<(), String> {
    let config = ctx.config.borrow();
    println!("default precision: {}", config.default_precision);
    println!("default mode:      {}", mode(config.default_countdown));
    println!("show seconds:      {}", config.show_seconds);
    println!("presets:           {}", config.presets.len());
    Ok(())
}

pub fn list_presets(ctx: &CliContext) -> Result<(), String> {
    let config = ctx.config.borrow();
    let names = config.preset_names();
    if names.is_empty() {
        println!("No presets saved");
        return Ok(());
    }

    println!(
        "{:<16} {:<10} {:<10} {:<10} Target",
        "Name", "Precision", "Mode", "Start"
    );
    println!("{}", "-".repeat(60));
    for name in names {
        let preset = config.preset(name).map_err(|e| e.to_string())?;
        println!(
            "{:<16} {:<10} {:<10} {:<10} {}",
            name,
            preset.precision.to_string(),
            mode(preset.countdown),
            format_time(preset.start_values.as_ref()),
            format_time(preset.target.as_ref()),
        );
    }
    Ok(())
}

pub fn save_preset(ctx: &CliContext, name: &str, args: &RunArgs) -> Result<(), String> {
    let preset = args.apply(TimerPreset::default())?;
    // reject what `start` would reject
    TimerSettings::from_config(TimerConfig::from(&preset)).map_err(|e| e.to_string())?;

    let replaced = ctx
        .config
        .borrow_mut()
        .set_preset(name, preset)
        .is_some();
    ctx.save_config().map_err(|e| e.to_string())?;

    if replaced {
        println!("updated preset '{name}'");
    } else {
        println!("saved preset '{name}'");
    }
    Ok(())
}

pub fn delete_preset(ctx: &CliContext, name: &str) -> Result<(), String> {
    ctx.config
        .borrow_mut()
        .remove_preset(name)
        .map_err(|e| e.to_string())?;
    ctx.save_config().map_err(|e| e.to_string())?;
    println!("deleted preset '{name}'");
    Ok(())
}

pub fn exit(ctx: &CliContext) {
    ctx.timer.stop();
    println!("quitting...");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempo_core::tick::VirtualClock;

    fn make_ctx(config: AppConfig) -> (VirtualClock, CliContext) {
        let clock = VirtualClock::new();
        let ctx = CliContext::in_memory(clock.clone(), config);
        (clock, ctx)
    }

    fn args(start: Option<&str>, target: Option<&str>) -> RunArgs {
        RunArgs {
            start: start.map(str::to_string),
            target: target.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn start_uses_configured_defaults() {
        let config = AppConfig {
            default_precision: Precision::Minutes,
            default_countdown: true,
            ..Default::default()
        };
        let (_clock, ctx) = make_ctx(config);

        start(&ctx, None, &args(Some("0,10,0"), None)).unwrap();

        let settings = ctx.timer.config();
        assert!(ctx.timer.is_running());
        assert_eq!(settings.precision, Precision::Minutes);
        assert!(settings.countdown);
        assert_eq!(settings.start_values.to_array(), [0, 10, 0]);
    }

    #[test]
    fn start_twice_reports_running_timer() {
        let (_clock, ctx) = make_ctx(AppConfig::default());
        start(&ctx, None, &RunArgs::default()).unwrap();

        let err = start(&ctx, None, &RunArgs::default()).unwrap_err();
        assert_eq!(err, "Timer already running");
    }

    #[test]
    fn start_rejects_bad_time_input() {
        let (_clock, ctx) = make_ctx(AppConfig::default());

        let err = start(&ctx, None, &args(None, Some("1,2"))).unwrap_err();
        assert!(err.contains("Array size not valid"), "{err}");

        let err = start(&ctx, None, &args(None, Some("a,b,c"))).unwrap_err();
        assert!(err.starts_with("invalid time 'a,b,c'"), "{err}");
        assert!(!ctx.timer.is_running());
    }

    #[test]
    fn start_unknown_preset_fails() {
        let (_clock, ctx) = make_ctx(AppConfig::default());
        let err = start(&ctx, Some("tea"), &RunArgs::default()).unwrap_err();
        assert_eq!(err, "preset 'tea' not found");
    }

    #[test]
    fn saved_preset_runs_to_its_target() {
        let (clock, ctx) = make_ctx(AppConfig::default());
        let preset_args = RunArgs {
            countdown: true,
            ..args(Some("0,4,0"), Some("0,0,0"))
        };
        save_preset(&ctx, "tea", &preset_args).unwrap();

        start(&ctx, Some("tea"), &RunArgs::default()).unwrap();
        clock.advance_secs(239);
        assert!(ctx.timer.is_running());
        clock.advance_secs(1);
        assert!(!ctx.timer.is_running());
        assert_eq!(ctx.timer.time_values().to_array(), [0, 0, 0]);
    }

    #[test]
    fn explicit_options_override_preset() {
        let (_clock, ctx) = make_ctx(AppConfig::default());
        save_preset(&ctx, "long", &args(None, Some("0,0,2"))).unwrap();

        let overrides = RunArgs {
            precision: Some(Precision::Hours),
            ..args(None, Some("0,30,0"))
        };
        start(&ctx, Some("long"), &overrides).unwrap();

        let settings = ctx.timer.config();
        assert_eq!(settings.precision, Precision::Hours);
        assert_eq!(settings.target.map(|t| t.to_array()), Some([0, 30, 0]));
    }

    #[test]
    fn invalid_preset_is_not_saved() {
        let (_clock, ctx) = make_ctx(AppConfig::default());
        let err = save_preset(&ctx, "broken", &args(Some("1,2,3,4"), None)).unwrap_err();

        assert!(err.contains("got 4"), "{err}");
        assert!(ctx.config.borrow().presets.is_empty());
    }

    #[test]
    fn delete_preset_removes_it() {
        let (_clock, ctx) = make_ctx(AppConfig::default());
        save_preset(&ctx, "tea", &RunArgs::default()).unwrap();

        delete_preset(&ctx, "tea").unwrap();
        assert!(ctx.config.borrow().presets.is_empty());
        assert_eq!(
            delete_preset(&ctx, "tea").unwrap_err(),
            "preset 'tea' not found"
        );
    }

    #[test]
    fn stop_and_exit_stop_the_timer() {
        let (clock, ctx) = make_ctx(AppConfig::default());
        start(&ctx, None, &RunArgs::default()).unwrap();
        clock.advance_secs(2);

        stop(&ctx).unwrap();
        assert!(!ctx.timer.is_running());
        assert_eq!(clock.subscriber_count(), 0);

        start(&ctx, None, &RunArgs::default()).unwrap();
        exit(&ctx);
        assert!(!ctx.timer.is_running());
    }

    #[test]
    fn format_time_normalizes_input() {
        assert_eq!(format_time(None), "-");
        assert_eq!(format_time(Some(&TimeInput::seconds(90))), "00:01:30");
        assert_eq!(format_time(Some(&TimeInput::Array(vec![1]))), "invalid");
    }
}
