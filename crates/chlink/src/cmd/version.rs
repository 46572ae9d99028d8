use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("chlink {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: chlink");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!(
        "target: {}",
        option_env!("CHLINK_BUILD_TARGET").unwrap_or("unknown")
    );
    println!("target_os: {}", std::env::consts::OS);
    println!("target_arch: {}", std::env::consts::ARCH);
    println!(
        "features: async={}, cli=true",
        cfg!(feature = "async")
    );
    println!(
        "frame: sync={:02X} {:02X}, header={}B, hi91_payload={}B",
        chlink_frame::SYNC[0],
        chlink_frame::SYNC[1],
        chlink_frame::HEADER_SIZE,
        chlink_frame::HI91_PAYLOAD_LEN
    );

    Ok(SUCCESS)
}
