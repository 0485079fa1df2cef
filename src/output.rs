use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// `'key' = 'value'` pairs as printed for a returned hashtable. The value may span lines;
/// a doubled `''` is part of the value, never its end.
static KEY_VALUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"'(?P<key>\w+)' = '(?P<value>(?:[^']|'')*)'(?:\s*[;\r\n}]|\s*$)")
        .expect("key/value regex is valid")
});

/// Extract `'key' = 'value'` pairs from command output.
///
/// Later occurrences of a key overwrite earlier ones. Anything that is not a quoted
/// pair is ignored. A quote inside a value must be doubled (`''`), as the command
/// interpreter does for single-quoted strings.
pub fn parse_command_output(output: &str) -> HashMap<String, String> {
    let mut results = HashMap::new();
    for caps in KEY_VALUE.captures_iter(output) {
        let key = caps["key"].to_string();
        let value = caps["value"].replace("''", "'");
        results.insert(key, value);
    }
    results
}

/// Quote a command argument as a single-quoted literal, doubling embedded quotes.
pub fn quote_argument(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
