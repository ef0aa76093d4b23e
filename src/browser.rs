use log::debug;
use std::io;
use std::process::Command;

/// Open a recipe link in the user's browser.
///
/// Uses `$BROWSER` when set, otherwise the platform opener. The URL is
/// passed through unmodified.
pub fn open_link(url: &str) -> io::Result<()> {
    let (program, args) = opener_command(url, std::env::var("BROWSER").ok().as_deref());
    debug!("Opening {} with {}", url, program);

    let status = Command::new(&program).args(&args).status()?;
    if status.success() {
        Ok(())
    } else {
        Err(io::Error::new(
            io::ErrorKind::Other,
            format!("{} exited with {}", program, status),
        ))
    }
}

/// The program and arguments used to open `url`
fn opener_command(url: &str, browser: Option<&str>) -> (String, Vec<String>) {
    // $BROWSER may hold a colon-separated list; the first entry wins
    let browser = browser
        .and_then(|value| value.split(':').next())
        .map(str::trim)
        .filter(|value| !value.is_empty());

    if let Some(browser) = browser {
        let mut parts = browser.split_whitespace().map(str::to_string);
        if let Some(program) = parts.next() {
            let mut args: Vec<String> = parts.collect();
            if args.iter().any(|arg| arg.contains("%s")) {
                args = args.into_iter().map(|arg| arg.replace("%s", url)).collect();
            } else {
                args.push(url.to_string());
            }
            return (program, args);
        }
    }

    if cfg!(target_os = "macos") {
        ("open".to_string(), vec![url.to_string()])
    } else if cfg!(target_os = "windows") {
        (
            "cmd".to_string(),
            vec!["/C".to_string(), "start".to_string(), String::new(), url.to_string()],
        )
    } else {
        ("xdg-open".to_string(), vec![url.to_string()])
    }
}
