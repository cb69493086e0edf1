//! Entry point for the dashtop TUI. Parses args, resolves the profile and runs the App.

use std::{
    env,
    io::{self, Write},
    sync::Arc,
};

use dashtop::api::ApiClient;
use dashtop::app::App;
use dashtop::chart::{DocumentPlotter, Plotter};
use dashtop::config::{parse_args, ParsedArgs, Settings};
use dashtop::controller::RefreshController;
use dashtop::document::Document;
use dashtop::logging::init_logging;
use dashtop::profiles::{
    load_profiles, save_profiles, ProfileEntry, ProfileRequest, ProfilesFile, ResolveProfile,
};
use tokio::sync::Mutex;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let parsed = match parse_args(env::args()) {
        Ok(v) => v,
        Err(msg) => {
            eprintln!("{msg}");
            return Ok(());
        }
    };
    init_logging(parsed.log_file.as_deref())?;

    let Some(entry) = resolve_entry(&parsed)? else {
        return Ok(());
    };
    let settings = Settings::from_profile(&entry, &parsed);
    info!(url = %settings.url, interval = ?settings.refresh_interval, "starting");

    if parsed.dry_run {
        eprintln!("Resolved backend {} (dry run, not connecting)", settings.url);
        return Ok(());
    }

    let api = ApiClient::new(&settings.url, settings.tls_ca.as_deref(), settings.timeout)?;
    let base_url = api.base().to_string();
    let doc = Arc::new(Mutex::new(Document::standard()));
    let plotter: Arc<dyn Plotter> = Arc::new(DocumentPlotter);
    let controller = Arc::new(RefreshController::new(
        api,
        doc,
        Some(plotter),
        settings.refresh_options(),
    ));

    let mut app = App::new(controller, base_url, settings.refresh_interval);
    app.run().await
}

fn persist(profiles: &ProfilesFile) {
    if let Err(e) = save_profiles(profiles) {
        warn!(error = %e, "saving profiles failed");
        eprintln!("Could not save profiles: {e}");
    }
}

// Final connection parameters, persisting new or changed profiles along the way
fn resolve_entry(parsed: &ParsedArgs) -> io::Result<Option<ProfileEntry>> {
    let mut profiles = load_profiles();
    let req = ProfileRequest {
        profile_name: parsed.profile.clone(),
        url: parsed.url.clone(),
        tls_ca: parsed.tls_ca.clone(),
        interval_secs: parsed.interval_secs,
    };

    match req.resolve(&profiles) {
        ResolveProfile::Direct(entry) => {
            if let Some(name) = parsed.profile.as_ref() {
                match profiles.profiles.get(name) {
                    None => {
                        // New profile: auto-save immediately
                        profiles.profiles.insert(name.clone(), entry.clone());
                        persist(&profiles);
                    }
                    Some(existing) if *existing != entry => {
                        let overwrite = parsed.save
                            || prompt_yes_no(&format!("Overwrite existing profile '{name}'? [y/N]: "));
                        if overwrite {
                            profiles.profiles.insert(name.clone(), entry.clone());
                            persist(&profiles);
                        }
                    }
                    Some(_) => {}
                }
            }
            Ok(Some(entry))
        }
        ResolveProfile::Loaded(entry) => Ok(Some(entry)),
        ResolveProfile::PromptSelect(names) => {
            eprintln!("Select profile:");
            for (i, n) in names.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, n);
            }
            let line = prompt_string("Enter number (or blank to abort): ")?;
            let picked = line
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|idx| (1..=names.len()).contains(idx))
                .and_then(|idx| profiles.profiles.get(&names[idx - 1]).cloned());
            Ok(picked)
        }
        ResolveProfile::PromptCreate(name) => {
            eprintln!("Profile '{name}' does not exist yet.");
            let url = prompt_string("Enter backend URL (http://HOST:PORT or https://...): ")?;
            if url.trim().is_empty() {
                return Ok(None);
            }
            let ca = prompt_string("Enter TLS CA path (or leave blank): ")?;
            let entry = ProfileEntry {
                url: url.trim().to_string(),
                tls_ca: Some(ca.trim().to_string()).filter(|s| !s.is_empty()),
                interval_secs: parsed.interval_secs,
            };
            profiles.profiles.insert(name, entry.clone());
            persist(&profiles);
            Ok(Some(entry))
        }
        ResolveProfile::None => {
            eprintln!("No URL provided and no profiles to select.");
            Ok(None)
        }
    }
}

fn prompt_yes_no(prompt: &str) -> bool {
    eprint!("{prompt}");
    let _ = io::stderr().flush();
    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_ok() {
        matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

fn prompt_string(prompt: &str) -> io::Result<String> {
    eprint!("{prompt}");
    let _ = io::stderr().flush();
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line)
}
