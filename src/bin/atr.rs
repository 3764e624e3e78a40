/// Interactive ATR console application

use atrmanager::map::draw_sector_map;
use atrmanager::*;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use std::fs::File;

/// Command completer for the REPL
struct CommandCompleter {
    commands: Vec<&'static str>,
}

impl CommandCompleter {
    fn new() -> Self {
        Self {
            commands: vec![
                "close",
                "create",
                "densities",
                "exit",
                "help",
                "info",
                "load",
                "map",
                "open",
                "quit",
                "read-sector",
                "write-sector",
            ],
        }
    }
}

impl Completer for CommandCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        // Only complete the first word (command name)
        let line_to_cursor = &line[..pos];
        if line_to_cursor.contains(' ') {
            return Ok((pos, vec![]));
        }

        let prefix = line_to_cursor.to_lowercase();
        let matches: Vec<Pair> = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(&prefix))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();

        Ok((0, matches))
    }
}

impl Hinter for CommandCompleter {
    type Hint = String;
}

impl Highlighter for CommandCompleter {}
impl Validator for CommandCompleter {}
impl Helper for CommandCompleter {}

/// Get the path to the history file
fn history_path() -> Option<std::path::PathBuf> {
    dirs::home_dir().map(|mut p| {
        p.push(".atrmanager_history");
        p
    })
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    println!("=== ATRManager ===");
    println!("Interactive console for exploring Atari ATR and XFD disk images.");
    println!("Type 'help' for available commands\n");

    let mut rl = match Editor::new() {
        Ok(rl) => rl,
        Err(e) => {
            log::error!("Failed to create editor: {}", e);
            return;
        }
    };
    rl.set_helper(Some(CommandCompleter::new()));

    if let Some(history_path) = history_path() {
        let _ = rl.load_history(&history_path);
    }

    let mut image: Option<DiskImage<File>> = None;
    let mut image_path = String::new();

    loop {
        let input = match rl.readline("> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        };

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let _ = rl.add_history_entry(input);

        let parts = parse_command_line(input);
        if parts.is_empty() {
            continue;
        }
        let command = parts[0].to_lowercase();

        match command.as_str() {
            "help" => print_help(),
            "quit" | "exit" => break,
            "densities" => print_densities(),
            "open" | "load" => {
                if parts.len() < 2 {
                    println!("Usage: open <path>");
                    continue;
                }
                match DiskImage::open(&parts[1]) {
                    Ok(img) => {
                        println!("Opened: {}", parts[1]);
                        image = Some(img);
                        image_path = parts[1].clone();
                    }
                    Err(e) => println!("Error: {}", e),
                }
            }
            "create" => {
                if parts.len() < 3 {
                    println!("Usage: create <density> <path>");
                    continue;
                }
                let density = match Density::from_name(&parts[1]) {
                    Some(d) => d,
                    None => {
                        println!("Unknown density '{}'. Try 'densities'.", parts[1]);
                        continue;
                    }
                };
                match DiskImage::create(&parts[2], density) {
                    Ok(img) => {
                        println!("Created {} image: {}", density, parts[2]);
                        image = Some(img);
                        image_path = parts[2].clone();
                    }
                    Err(e) => println!("Error: {}", e),
                }
            }
            "close" => {
                if image.take().is_some() {
                    println!("Closed: {}", image_path);
                    image_path.clear();
                } else {
                    println!("No image loaded.");
                }
            }
            "info" => {
                if let Some(ref img) = image {
                    print_info(img, &image_path);
                } else {
                    println!("No image loaded. Use 'open <path>' or 'create' first.");
                }
            }
            "read-sector" => {
                if let Some(ref mut img) = image {
                    let sector = match parts.get(1).and_then(|s| parse_hex_or_dec(s)) {
                        Some(n) => n,
                        None => {
                            println!("Usage: read-sector <sector>");
                            continue;
                        }
                    };

                    match img.read_sector(sector) {
                        Ok(data) => {
                            println!("Sector {} ({} bytes, {}):", sector, data.len(), data.status());
                            print_hex_dump(data.data(), 256);
                        }
                        Err(e) => println!("Error: {}", e),
                    }
                } else {
                    println!("No image loaded.");
                }
            }
            "write-sector" => {
                if let Some(ref mut img) = image {
                    let sector = parts.get(1).and_then(|s| parse_hex_or_dec(s));
                    let fill = parts
                        .get(2)
                        .and_then(|s| parse_hex_or_dec(s))
                        .and_then(|b| u8::try_from(b).ok());
                    let (sector, fill) = match (sector, fill) {
                        (Some(s), Some(f)) => (s, f),
                        _ => {
                            println!("Usage: write-sector <sector> <byte>");
                            continue;
                        }
                    };

                    let result = img
                        .sector_length(sector)
                        .and_then(|len| img.write_sector(sector, &vec![fill; len]));
                    match result {
                        Ok(()) => println!("Filled sector {} with {:#04X}", sector, fill),
                        Err(e) => println!("Error: {}", e),
                    }
                } else {
                    println!("No image loaded.");
                }
            }
            "map" => {
                if let Some(ref mut img) = image {
                    if let Err(e) = draw_sector_map(img) {
                        println!("Error: {}", e);
                    }
                } else {
                    println!("No image loaded.");
                }
            }
            _ => {
                println!("Unknown command: {}. Type 'help' for available commands.", command);
            }
        }
    }

    if let Some(history_path) = history_path() {
        let _ = rl.save_history(&history_path);
    }
    println!("Goodbye!");
}

/// Split a command line into words, honouring double quotes
fn parse_command_line(input: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in input.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
            }
            ' ' | '\t' if !in_quotes => {
                if !current.is_empty() {
                    parts.push(current.clone());
                    current.clear();
                }
            }
            _ => {
                current.push(ch);
            }
        }
    }

    if !current.is_empty() {
        parts.push(current);
    }

    parts
}

fn print_help() {
    println!("Available commands:");
    println!("  open <path>                    - Open an ATR or XFD image (use quotes for paths with spaces)");
    println!("  create <density> <path>        - Create a blank image (.xfd is raw, anything else ATR)");
    println!("  close                          - Close the current image");
    println!("  info                           - Show disk information");
    println!("  read-sector <n>                - Read and display a sector");
    println!("  write-sector <n> <byte>        - Fill a sector with a byte value");
    println!("  map                            - Visual sector map (white=in use, yellow=filler, grey=blank)");
    println!("  densities                      - List density names accepted by 'create'");
    println!("  help                           - Show this help");
    println!("  quit, exit                     - Exit");
}

fn print_densities() {
    let aliases = ["sd35", "sd40 (sd)", "ed35", "ed40 (ed)", "dd35", "dd40 (dd)"];
    for (density, alias) in Density::ALL.iter().zip(aliases) {
        println!(
            "  {:<10} {:<15} {:>4} sectors {:>7} bytes",
            alias,
            density.name(),
            density.sector_count(),
            density.total_size()
        );
    }
}

fn print_info(image: &DiskImage<File>, path: &str) {
    let geometry = match image.geometry() {
        Some(g) => g,
        None => return,
    };

    println!("Filename: {}", path);
    println!("Format: {}", geometry.kind.name());
    match image.density() {
        Some(density) => println!("Density: {}", density),
        None => println!("Density: non-standard"),
    }
    println!("Sector size: {} bytes", geometry.sector_size);
    if geometry.boot_layout == BootLayout::Padded {
        println!("Boot sectors: padded to 256 bytes");
    }
    println!("Sectors: {}", geometry.sector_count());
    println!("Data size: {} bytes", geometry.data_size);
    if let Some(percom) = image.percom_block() {
        let hex: Vec<String> = percom.iter().map(|b| format!("{:02X}", b)).collect();
        println!("PERCOM: {}", hex.join(" "));
    }
    println!("Changed: {}", if image.is_changed() { "Yes" } else { "No" });
}

fn print_hex_dump(data: &[u8], max_bytes: usize) {
    let len = data.len().min(max_bytes);

    for (i, chunk) in data[..len].chunks(16).enumerate() {
        print!("{:04X}: ", i * 16);

        for (j, byte) in chunk.iter().enumerate() {
            print!("{:02X} ", byte);
            if j == 7 {
                print!(" ");
            }
        }

        // Pad if less than 16 bytes
        for j in chunk.len()..16 {
            print!("   ");
            if j == 7 {
                print!(" ");
            }
        }

        print!(" |");

        for byte in chunk {
            let c = if *byte >= 32 && *byte < 127 {
                *byte as char
            } else {
                '.'
            };
            print!("{}", c);
        }

        println!("|");
    }

    if data.len() > max_bytes {
        println!("... ({} more bytes)", data.len() - max_bytes);
    }
}

fn parse_hex_or_dec(s: &str) -> Option<u16> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u16::from_str_radix(hex, 16).ok()
    } else {
        s.parse().ok()
    }
}
