use std::env;
use std::fs;
use std::path::Path;

#[path = "src/env_keys.rs"]
mod env_keys;

fn main() {
    // Forward .env entries to option_env! at compile time
    let env_file = Path::new(".env");

    if env_file.exists() {
        println!("cargo:rerun-if-changed=.env");

        match fs::read_to_string(env_file) {
            Ok(contents) => {
                for (number, line) in contents.lines().enumerate() {
                    let line = line.trim();
                    if line.is_empty() || line.starts_with('#') {
                        continue;
                    }

                    let Some((key, value)) = line.split_once('=') else {
                        println!("cargo:warning=.env line {}: expected KEY=value, got `{}`", number + 1, line);
                        continue;
                    };
                    let key = key.trim();
                    let value = value.trim().trim_matches('"');

                    if let Err(problem) = env_keys::check(key, value) {
                        println!("cargo:warning=.env line {}: {}", number + 1, problem);
                    }

                    // Real environment variables win over .env
                    if env::var(key).is_err() {
                        println!("cargo:rustc-env={}={}", key, value);
                    }
                }
            }
            Err(e) => println!("cargo:warning=Could not read .env: {}", e),
        }
    } else {
        println!("cargo:warning=No .env file found, using built-in defaults. Copy .env.example to .env to point at your PocketBase server.");
    }

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=src/env_keys.rs");
    println!("cargo:rerun-if-changed=.env.example");
}
