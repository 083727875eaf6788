use std::process::ExitCode;

use anyhow::{anyhow, bail, Context};
use client::{MovieClient, SearchParams, SubmitOutcome};
use dotenvy::dotenv;
use models::MovieInput;
use tracing::error;

const USAGE: &str = "usage: movies-client <command> [args]

commands:
  list
  search [--search TEXT] [--order-by FIELD] [--per-page N] [--page N]
  get ID
  create --title T --genre G --description D --release-year Y
  update ID [--title T] [--genre G] [--description D] [--release-year Y]
  delete ID";

/// `--flag value` pairs after the positional arguments.
struct Flags(Vec<(String, String)>);

impl Flags {
    fn parse(args: &[String]) -> anyhow::Result<Self> {
        let mut out = Vec::new();
        let mut it = args.iter();
        while let Some(flag) = it.next() {
            let name = flag
                .strip_prefix("--")
                .ok_or_else(|| anyhow!("unexpected argument {flag}"))?;
            let value = it.next().ok_or_else(|| anyhow!("--{name} needs a value"))?;
            out.push((name.to_string(), value.clone()));
        }
        Ok(Self(out))
    }

    fn get(&self, name: &str) -> Option<String> {
        self.0.iter().rev().find(|(k, _)| k == name).map(|(_, v)| v.clone())
    }

    fn number(&self, name: &str) -> anyhow::Result<Option<i64>> {
        self.get(name)
            .map(|v| v.parse::<i64>().with_context(|| format!("--{name} must be an integer")))
            .transpose()
    }

    /// Overlay the movie fields given on the command line onto `input`.
    fn apply(&self, mut input: MovieInput) -> MovieInput {
        if let Some(v) = self.get("title") { input.title = Some(v); }
        if let Some(v) = self.get("genre") { input.genre = Some(v); }
        if let Some(v) = self.get("description") { input.description = Some(v); }
        if let Some(v) = self.get("release-year") { input.release_year = Some(v); }
        input
    }
}

fn parse_id(arg: Option<&String>) -> anyhow::Result<i64> {
    let raw = arg.ok_or_else(|| anyhow!("missing movie id"))?;
    raw.parse::<i64>().with_context(|| format!("invalid movie id {raw}"))
}

fn print<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn finish(outcome: SubmitOutcome) -> anyhow::Result<()> {
    match outcome {
        SubmitOutcome::Completed(movie) => print(&movie),
        SubmitOutcome::Resubmit { input, error } => {
            eprintln!("submission rejected: {error}");
            if let client::ClientError::Api { fields, .. } = &error {
                for f in fields {
                    eprintln!("  {}: {}", f.field, f.message);
                }
            }
            eprintln!("submitted:");
            eprintln!("{}", serde_json::to_string_pretty(&input)?);
            bail!("request was not applied")
        }
    }
}

async fn dispatch(api: &MovieClient, args: &[String]) -> anyhow::Result<()> {
    let Some(command) = args.first() else { bail!("{USAGE}") };
    match command.as_str() {
        "list" => print(&api.list().await?),
        "search" => {
            let flags = Flags::parse(&args[1..])?;
            let params = SearchParams {
                search_string: flags.get("search"),
                order_by: flags.get("order-by"),
                per_page: flags.number("per-page")?,
                page: flags.number("page")?,
            };
            print(&api.search(&params).await?)
        }
        "get" => print(&api.get(parse_id(args.get(1))?).await?),
        "create" => {
            let flags = Flags::parse(&args[1..])?;
            let input = flags.apply(MovieInput { id: Some(0), ..Default::default() });
            finish(api.create(input).await)
        }
        "update" => {
            let id = parse_id(args.get(1))?;
            let flags = Flags::parse(&args[2..])?;
            let current = api.get(id).await?;
            finish(api.update(id, flags.apply(MovieInput::from(current))).await)
        }
        "delete" => {
            let id = parse_id(args.get(1))?;
            let shown = api.get(id).await?;
            finish(api.delete(id, MovieInput::from(shown)).await)
        }
        "help" | "--help" | "-h" => {
            println!("{USAGE}");
            Ok(())
        }
        other => bail!("unknown command {other}\n\n{USAGE}"),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    common::utils::logging::init_logging_default();

    let cfg = match configs::load_or_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "client", event = "config_invalid", error = %e, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };
    let api = match MovieClient::from_config(&cfg.client) {
        Ok(api) => api,
        Err(e) => {
            error!(service = "client", event = "client_build_failed", error = %e, "failed to build http client");
            return ExitCode::FAILURE;
        }
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    match dispatch(&api, &args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
