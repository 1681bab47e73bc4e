use std::str::FromStr;

pub(crate) const HELP: &str = "\
new                   create a new queue, freeing the current one
free                  free the current queue
ih <str> [n]          insert <str> at the head, n times
it <str> [n]          insert <str> at the tail, n times
rh [str]              remove the head, checking it equals <str>
rhq                   remove the head without copying it out
size [n]              print the queue size, checking it equals n
show                  print the queue contents
reverse               reverse the queue
sort                  sort the queue in natural order
option fail <pct>     make <pct>% of allocations fail
option seed <u64>     seed the allocation failures
help                  show this message
quit                  stop reading commands";

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Command {
    New,
    Free,
    InsertHead { value: String, count: usize },
    InsertTail { value: String, count: usize },
    RemoveHead { expected: Option<String> },
    RemoveHeadQuiet,
    Size { expected: Option<usize> },
    Show,
    Reverse,
    Sort,
    FailRate(u8),
    Seed(u64),
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let Some(name) = words.next() else {
            return Err("empty command".to_owned());
        };
        let args = words.collect::<Vec<_>>();
        let cmd = match (name, args.as_slice()) {
            ("new", []) => Command::New,
            ("free", []) => Command::Free,
            ("ih", [value, rest @ ..]) => Command::InsertHead {
                value: value.to_string(),
                count: parse_count(rest)?,
            },
            ("it", [value, rest @ ..]) => Command::InsertTail {
                value: value.to_string(),
                count: parse_count(rest)?,
            },
            ("rh", []) => Command::RemoveHead { expected: None },
            ("rh", [expected]) => Command::RemoveHead {
                expected: Some(expected.to_string()),
            },
            ("rhq", []) => Command::RemoveHeadQuiet,
            ("size", []) => Command::Size { expected: None },
            ("size", [n]) => Command::Size {
                expected: Some(parse(n, "size")?),
            },
            ("show", []) => Command::Show,
            ("reverse", []) => Command::Reverse,
            ("sort", []) => Command::Sort,
            ("option", ["fail", pct]) => {
                let pct = parse::<u8>(pct, "percentage")?;
                if pct > 100 {
                    return Err(format!("percentage out of range: {pct}"));
                }
                Command::FailRate(pct)
            },
            ("option", ["seed", seed]) => Command::Seed(parse(seed, "seed")?),
            ("help", []) => Command::Help,
            ("quit", []) => Command::Quit,
            ("new" | "free" | "ih" | "it" | "rh" | "rhq" | "size" | "show" | "reverse"
            | "sort" | "option" | "help" | "quit", _) => {
                return Err(format!("invalid arguments for `{name}`"));
            },
            _ => return Err(format!("unknown command `{name}`")),
        };
        Ok(cmd)
    }
}

fn parse_count(args: &[&str]) -> Result<usize, String> {
    match args {
        [] => Ok(1),
        [n] => parse(n, "count"),
        _ => Err("too many arguments".to_owned()),
    }
}

fn parse<T: FromStr>(s: &str, what: &str) -> Result<T, String> {
    s.parse().map_err(|_| format!("invalid {what}: {s}"))
}
