//! Simple program to sign and verify a payload with RSASSA-PSS

use std::io::Read;

use clap::Parser;
use clio::Input;
use eyre::eyre;
use httpsig::{Algorithm, PssOptions, SignAlgorithm};

#[derive(Parser)]
enum Commands {
    /// Signs a payload and prints the base64 encoded signature
    Sign {
        /// PEM or DER encoded private key
        key: Input,
        /// The ASCII text to sign
        payload: String,
        /// JSON file with the PSS options
        #[arg(short, long)]
        options: Option<Input>,
    },
    /// Verifies a base64 encoded signature over a payload
    Verify {
        /// PEM or DER encoded public key
        key: Input,
        /// The ASCII text that was signed
        payload: String,
        /// The base64 encoded signature
        signature: String,
        /// JSON file with the PSS options
        #[arg(short, long)]
        options: Option<Input>,
    },
}

fn read_options(options: Option<Input>) -> eyre::Result<Algorithm> {
    let options: PssOptions = match options {
        Some(input) => serde_json::from_reader(input)?,
        None => PssOptions::default(),
    };
    Ok(Algorithm::from_scheme("hs2019", options)?)
}

fn read_key(mut key: Input) -> eyre::Result<Vec<u8>> {
    let mut material = vec![];
    key.read_to_end(&mut material)?;
    Ok(material)
}

fn main() -> eyre::Result<()> {
    let cmds = Commands::parse();

    match cmds {
        Commands::Sign {
            key,
            payload,
            options,
        } => {
            let alg = read_options(options)?;
            let key = read_key(key)?;

            let signature = alg.sign(&key, payload.as_str().into())?;
            println!("{}: {}", alg.name(), signature.to_base64());
        }
        Commands::Verify {
            key,
            payload,
            signature,
            options,
        } => {
            let alg = read_options(options)?;
            let key = read_key(key)?;

            if !alg.verify(&key, payload.as_str().into(), signature.as_bytes())? {
                return Err(eyre!("Signature is invalid"));
            }
            println!("Signature is valid");
        }
    }

    Ok(())
}
