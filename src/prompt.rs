//! Interactive configuration prompts
//!
//! Asks for whatever the command line, environment and config file left
//! unset. Input and output are injected so the menus can be driven from
//! tests.

use std::io::{self, BufRead, Write};
use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};

use crate::banner::RULE;
use crate::config::{Config, DEFAULT_PORT};
use crate::logger;

const FALLBACK_DIRECTORY: &str = "/tmp";

/// One entry of the bind address menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressChoice {
    pub label: String,
    pub addr: IpAddr,
}

/// Menu-driven prompter over any line source and sink
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Prompt for every unset listener or served-directory value
    pub fn fill_missing(&mut self, config: &mut Config) -> io::Result<()> {
        if config.serve.directory.is_none() {
            let home = dirs::home_dir();
            config.serve.directory = Some(self.select_directory(home.as_deref())?);
        }
        if config.server.host.is_none() {
            let choices = address_choices(&list_interfaces());
            config.server.host = Some(self.select_address(&choices)?);
        }
        if config.server.port.is_none() {
            config.server.port = Some(self.select_port()?);
        }
        Ok(())
    }

    /// Directory menu; an unknown choice falls back to `/tmp`
    pub fn select_directory(&mut self, home: Option<&Path>) -> io::Result<PathBuf> {
        if let Some(home) = home {
            writeln!(self.output, "Home Directory: {}", home.display())?;
        }
        writeln!(self.output, "Select a directory to serve files from:")?;
        writeln!(self.output, "1) /var/www/html")?;
        match home {
            Some(home) => writeln!(self.output, "2) {}", home.display())?,
            None => writeln!(self.output, "2) Home directory (unknown)")?,
        }
        writeln!(self.output, "3) /tmp")?;
        writeln!(self.output, "4) Custom directory")?;

        let choice = self.ask("Enter your choice [1-4]: ")?;
        let dir = match (choice.as_str(), home) {
            ("1", _) => PathBuf::from("/var/www/html"),
            ("2", Some(home)) => home.to_path_buf(),
            ("3", _) => PathBuf::from(FALLBACK_DIRECTORY),
            ("4", _) => PathBuf::from(self.ask("Please enter a custom directory: ")?),
            _ => {
                writeln!(self.output, "Invalid choice. Defaulting to {FALLBACK_DIRECTORY}.")?;
                PathBuf::from(FALLBACK_DIRECTORY)
            }
        };
        Ok(dir)
    }

    /// Bind address menu; an unknown choice or unparsable address is an error
    pub fn select_address(&mut self, choices: &[AddressChoice]) -> io::Result<String> {
        writeln!(self.output, "{RULE}")?;
        writeln!(self.output, "Select an address to serve from:")?;
        for (i, choice) in choices.iter().enumerate() {
            writeln!(self.output, "{}) {} ({})", i + 1, choice.label, choice.addr)?;
        }
        let custom = choices.len() + 1;
        writeln!(self.output, "{custom}) Custom address")?;

        let answer = self.ask(&format!("Enter your choice [1-{custom}]: "))?;
        let index = answer
            .parse::<usize>()
            .ok()
            .filter(|i| (1..=custom).contains(i))
            .ok_or_else(|| invalid(format!("Invalid choice: {answer:?}")))?;

        if index == custom {
            let addr = self.ask("Please enter a custom address: ")?;
            addr.parse::<IpAddr>()
                .map_err(|e| invalid(format!("Invalid address {addr:?}: {e}")))?;
            return Ok(addr);
        }
        Ok(choices[index - 1].addr.to_string())
    }

    /// Port menu; an unknown choice falls back to 8080, a bad custom port is an error
    pub fn select_port(&mut self) -> io::Result<u16> {
        writeln!(self.output, "{RULE}")?;
        writeln!(self.output, "Select a port to serve from:")?;
        writeln!(self.output, "1) 80 (HTTP)")?;
        writeln!(self.output, "2) 443 (HTTPS)")?;
        writeln!(self.output, "3) 8080 (Alternative HTTP)")?;
        writeln!(self.output, "4) Custom port")?;

        let choice = self.ask("Enter your choice [1-4]: ")?;
        let port = match choice.as_str() {
            "1" => 80,
            "2" => 443,
            "3" => 8080,
            "4" => {
                let port = self.ask("Please enter a custom port: ")?;
                port.parse::<u16>()
                    .map_err(|e| invalid(format!("Invalid port number {port:?}: {e}")))?
            }
            _ => {
                writeln!(self.output, "Invalid choice. Defaulting to port {DEFAULT_PORT}.")?;
                DEFAULT_PORT
            }
        };
        Ok(port)
    }

    /// Print `prompt` and read one trimmed line; end of input reads as empty
    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line.trim().to_string())
    }
}

/// One entry per IPv4 interface address, then all interfaces
pub fn address_choices(interfaces: &[(String, IpAddr)]) -> Vec<AddressChoice> {
    let mut choices: Vec<AddressChoice> = interfaces
        .iter()
        .filter(|(_, addr)| addr.is_ipv4())
        .map(|(name, addr)| AddressChoice {
            label: name.clone(),
            addr: *addr,
        })
        .collect();
    choices.push(AddressChoice {
        label: "All interfaces".to_string(),
        addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
    });
    choices
}

/// `(interface name, address)` for every address of every interface
pub fn list_interfaces() -> Vec<(String, IpAddr)> {
    match if_addrs::get_if_addrs() {
        Ok(interfaces) => interfaces
            .into_iter()
            .map(|iface| {
                let ip = iface.ip();
                (iface.name, ip)
            })
            .collect(),
        Err(e) => {
            logger::log_warning(&format!("Cannot list network interfaces: {e}"));
            Vec::new()
        }
    }
}

fn invalid(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Options;

    fn prompter(input: &str) -> Prompter<&[u8], Vec<u8>> {
        Prompter::new(input.as_bytes(), Vec::new())
    }

    fn interfaces() -> Vec<(String, IpAddr)> {
        [
            ("lo", "127.0.0.1"),
            ("eth0", "192.168.1.20"),
            ("eth0", "fe80::1"),
            ("tun0", "10.10.14.3"),
        ]
        .into_iter()
        .map(|(name, addr)| (name.to_string(), addr.parse().unwrap()))
        .collect()
    }

    fn choices() -> Vec<AddressChoice> {
        address_choices(&interfaces())
    }

    #[test]
    fn test_directory_choices() {
        let home = Path::new("/home/player");
        assert_eq!(
            prompter("1\n").select_directory(Some(home)).unwrap(),
            PathBuf::from("/var/www/html")
        );
        assert_eq!(prompter("2\n").select_directory(Some(home)).unwrap(), home);
        assert_eq!(
            prompter("3\n").select_directory(Some(home)).unwrap(),
            PathBuf::from("/tmp")
        );
        assert_eq!(
            prompter("4\n/srv/loot\n").select_directory(Some(home)).unwrap(),
            PathBuf::from("/srv/loot")
        );
    }

    #[test]
    fn test_invalid_directory_choice_defaults_to_tmp() {
        let mut p = prompter("9\n");
        assert_eq!(p.select_directory(None).unwrap(), PathBuf::from("/tmp"));
        let out = String::from_utf8(p.output).unwrap();
        assert!(out.contains("Invalid choice. Defaulting to /tmp."));

        // Home unknown: choice 2 is not available
        assert_eq!(
            prompter("2\n").select_directory(None).unwrap(),
            PathBuf::from("/tmp")
        );
    }

    #[test]
    fn test_address_choices() {
        assert_eq!(prompter("1\n").select_address(&choices()).unwrap(), "127.0.0.1");
        assert_eq!(prompter("2\n").select_address(&choices()).unwrap(), "192.168.1.20");
        assert_eq!(prompter("3\n").select_address(&choices()).unwrap(), "10.10.14.3");
        assert_eq!(prompter("4\n").select_address(&choices()).unwrap(), "0.0.0.0");
        assert_eq!(
            prompter("5\n::1\n").select_address(&choices()).unwrap(),
            "::1"
        );
    }

    #[test]
    fn test_address_menu_lists_every_ipv4_interface() {
        let mut p = prompter("3\n");
        p.select_address(&choices()).unwrap();
        let out = String::from_utf8(p.output).unwrap();
        assert!(out.contains("1) lo (127.0.0.1)"));
        assert!(out.contains("2) eth0 (192.168.1.20)"));
        assert!(out.contains("3) tun0 (10.10.14.3)"));
        assert!(out.contains("4) All interfaces (0.0.0.0)"));
        assert!(out.contains("5) Custom address"));
        assert!(!out.contains("fe80"));
    }

    #[test]
    fn test_invalid_address_is_an_error() {
        assert!(prompter("7\n").select_address(&choices()).is_err());
        assert!(prompter("abc\n").select_address(&choices()).is_err());
        assert!(prompter("").select_address(&choices()).is_err());
        assert!(prompter("5\nnot-an-ip\n").select_address(&choices()).is_err());
    }

    #[test]
    fn test_no_interfaces_still_offers_all_and_custom() {
        let choices = address_choices(&[]);
        assert_eq!(choices.len(), 1);
        assert_eq!(prompter("1\n").select_address(&choices).unwrap(), "0.0.0.0");
        assert_eq!(
            prompter("2\n10.0.0.9\n").select_address(&choices).unwrap(),
            "10.0.0.9"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_home_choice_survives_missing_home_variable() {
        let saved = std::env::var_os("HOME");
        std::env::remove_var("HOME");
        let home = dirs::home_dir();
        if let Some(saved) = saved {
            std::env::set_var("HOME", saved);
        }

        // Falls back to the account database instead of dropping choice 2
        let home = home.unwrap();
        assert_eq!(
            prompter("2\n").select_directory(Some(home.as_path())).unwrap(),
            home
        );
    }

    #[test]
    fn test_port_choices() {
        assert_eq!(prompter("1\n").select_port().unwrap(), 80);
        assert_eq!(prompter("2\n").select_port().unwrap(), 443);
        assert_eq!(prompter("3\n").select_port().unwrap(), 8080);
        assert_eq!(prompter("4\n9001\n").select_port().unwrap(), 9001);
        assert_eq!(prompter("x\n").select_port().unwrap(), 8080);
        assert!(prompter("4\n70000\n").select_port().is_err());
    }

    #[test]
    fn test_fill_missing_only_asks_for_unset_values() {
        let dir = tempfile::tempdir().unwrap();
        let mut config =
            Config::load_from(&dir.path().join("absent.toml"), false, &Options::default())
                .unwrap();
        config.serve.directory = Some(dir.path().to_path_buf());
        config.server.host = Some("10.0.0.1".to_string());

        let mut p = prompter("2\n");
        p.fill_missing(&mut config).unwrap();
        assert_eq!(config.server.port, Some(443));
        assert_eq!(config.server.host.as_deref(), Some("10.0.0.1"));
        assert_eq!(config.serve.directory.as_deref(), Some(dir.path()));

        let out = String::from_utf8(p.output).unwrap();
        assert!(out.contains("Select a port"));
        assert!(!out.contains("Select a directory"));
    }
}
