use super::*;


fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

fn parse_command(args: &[&str]) -> CliCommand {
    parse(args).command
}
