use clap::Args;

use toolbelt::core::digest::{self, DigestEncoding, HashAlgorithm};
use toolbelt::utils::io::{self, ArgJoin};
use toolbelt::Result;

#[derive(Args)]
pub struct HashArgs {
    /// Digest algorithm
    #[arg(value_enum)]
    algorithm: HashAlgorithm,

    /// Output encoding
    #[arg(long, value_enum, default_value = "hex")]
    encoding: DigestEncoding,

    /// Salt appended to the input before hashing
    #[arg(long, default_value = "")]
    salt: String,

    /// Data to hash (stdin when piped)
    input: Vec<String>,
}

pub fn run(args: HashArgs) -> Result<()> {
    let data = io::read_input_bytes(&args.input, ArgJoin::Space)?;
    println!(
        "{}",
        digest::digest(args.algorithm, &data, args.salt.as_bytes(), args.encoding)
    );
    Ok(())
}
