#![no_main]

use dispatch::{parse_choice, Command, MenuChoice};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|line: &str| {
    if let MenuChoice::Submit(command) = parse_choice(line) {
        assert_eq!(Command::try_from(command.tag()).ok(), Some(command));
    }
});
