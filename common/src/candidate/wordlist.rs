use std::collections::HashSet;
use std::path::Path;

use crate::error::ConfigError;

pub const SUBDOMAINS: &[&str] = &[
    "www", "mail", "blog", "dev", "test", "admin", "api", "shop", "staging", "beta",
    "app", "portal", "vpn", "remote", "webmail", "smtp", "pop", "imap", "ftp", "ns1",
    "ns2", "m", "mobile", "cdn", "static", "assets", "img", "images", "media", "docs",
    "support", "help", "status", "dashboard", "auth", "login", "sso", "id", "accounts", "secure",
    "git", "gitlab", "jenkins", "ci", "build", "monitor", "grafana", "kibana", "jira", "wiki",
    "intranet", "internal", "corp", "crm", "erp", "hr", "payments", "pay", "billing", "store",
    "forum", "community", "news", "events", "careers", "jobs", "demo", "sandbox", "uat", "qa",
    "preprod", "prod", "backup", "db", "mysql", "redis", "search", "analytics", "metrics", "logs",
    "api2", "v1", "v2", "old", "new", "web", "cloud", "files", "download", "upload",
];

pub const DIRECTORIES: &[&str] = &[
    "admin", "login", "uploads", "images", "api", "backup", "backups", "config", "css", "js",
    "assets", "static", "media", "files", "downloads", "includes", "inc", "lib", "vendor", "tmp",
    "temp", "test", "tests", "dev", "old", "new", "private", "public", "dashboard", "panel",
    "cpanel", "phpmyadmin", "wp-admin", "wp-content", "wp-includes", "wp-login.php", "administrator", "user", "users", "account",
    "accounts", "register", "signup", "logout", "auth", "oauth", "sso", "api/v1", "api/v2", "graphql",
    "docs", "doc", "swagger", "swagger-ui", "openapi.json", "status", "health", "metrics", "server-status", "debug",
    ".git", ".env", ".svn", ".htaccess", "robots.txt", "sitemap.xml", "crossdomain.xml", "cgi-bin", "scripts", "search",
    "blog", "news", "shop", "cart", "checkout", "store", "products", "catalog", "forum", "support",
    "help", "contact", "about", "portal", "console", "manager", "install", "setup", "db", "database",
];

pub fn subdomains() -> Vec<String> {
    SUBDOMAINS.iter().map(|s| s.to_string()).collect()
}

pub fn directories() -> Vec<String> {
    DIRECTORIES.iter().map(|s| s.to_string()).collect()
}

/// Reads a wordlist file, one entry per line.
pub fn load(path: &Path) -> Result<Vec<String>, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Wordlist {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse(&contents))
}

/// Blank lines and `#` comments are skipped; repeated entries keep their first position.
pub fn parse(contents: &str) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter(|line| seen.insert(*line))
        .map(String::from)
        .collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
