//! Drive an example component from the terminal.
//!
//! Each stdin line is one user action on the rendered view, `<kind> <selectors...> [= <value>]`:
//!
//! ```text
//! input @height .slider = 180
//! click .increment
//! change input = true
//! ```
//!
//! `@name` is short for the root of an isolation scope: `@weight` and `@height` name the BMI
//! component's sliders, any other name the scope of that name. After each line the current view
//! is printed as HTML.

use std::collections::HashMap;
use std::io::BufRead;
use std::path::PathBuf;
use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use rx_widgets::components::{bmi_component_with, calculator::bmi_calculator, circle::circle, counter::counter, toggle::toggle};
use rx_widgets::config::AppConfig;
use rx_widgets::{run, DomDriver, EventValue, FlowGraph, Scope};

#[derive(Parser)]
#[command(name = "rx-widgets", about = "Run a reactive example component against scripted input")]
struct Cli {
    /// Component to run
    #[arg(value_enum)]
    component: Component,

    /// TOML file overriding slider props
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only print the final view
    #[arg(long, default_value_t = false)]
    quiet: bool
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Component {
    Bmi,
    Calculator,
    Counter,
    Toggle,
    Circle
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default()
    };

    let mut g = FlowGraph::new();
    let mut scopes = HashMap::new();
    let driver = match cli.component {
        Component::Bmi => run(&g, |g, dom| {
            let sinks = bmi_component_with(g, dom, config.weight.clone(), config.height.clone());
            scopes.insert("weight".to_string(), sinks.weight_scope);
            scopes.insert("height".to_string(), sinks.height_scope);
            sinks.dom
        }),
        Component::Calculator => run(&g, bmi_calculator),
        Component::Counter => run(&g, counter),
        Component::Toggle => run(&g, toggle),
        Component::Circle => run(&g, |g, dom| circle(g, dom, config.radius.clone()))
    };
    info!("running {:?} ({} nodes)", cli.component, g.len());
    g.flush();
    if !cli.quiet {
        print_view(&driver)?;
    }

    for line in std::io::stdin().lock().lines() {
        let line = line.context("read stdin")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        dispatch_line(&g, &driver, &scopes, line).with_context(|| format!("action `{}`", line))?;
        g.flush();
        if !cli.quiet {
            print_view(&driver)?;
        }
    }

    if cli.quiet {
        print_view(&driver)?;
    }
    Ok(())
}

fn dispatch_line(g: &FlowGraph, driver: &DomDriver, scopes: &HashMap<String, Scope>, line: &str) -> Result<()> {
    let (action, value) = match line.split_once('=') {
        Some((action, value)) => (action.trim(), Some(value.trim())),
        None => (line, None)
    };
    let mut words = action.split_whitespace();
    let Some(kind) = words.next() else {
        bail!("missing event kind");
    };
    let selectors = words
        .map(|word| match word.strip_prefix('@') {
            Some(name) => match scopes.get(name) {
                Some(scope) => scope.selector(),
                None => Scope::new(name).selector()
            },
            None => word.to_string()
        })
        .collect::<Vec<_>>()
        .join(" ");
    let value = match value {
        None => EventValue::None,
        Some("true") => EventValue::Checked(true),
        Some("false") => EventValue::Checked(false),
        Some(value) => match value.parse::<f64>() {
            Ok(number) if number.is_finite() => EventValue::Number(number),
            _ => EventValue::Text(value.to_string())
        }
    };
    driver.dispatch(g, &selectors, kind, value)?;
    Ok(())
}

fn print_view(driver: &DomDriver) -> Result<()> {
    if let Some(error) = driver.error() {
        bail!("view failed: {}", error);
    }
    match driver.html() {
        Some(html) => println!("{}", html),
        None => println!("(nothing rendered)")
    }
    Ok(())
}
