//! Command line parsing.
//!
//! Tokens are not separated: `diskgetmodelserialnumber` is the domain `disk`,
//! the `get` marker, then the fields `model` and `serialnumber`. Matching
//! works on the whitespace-stripped, lowercased line:
//!
//! 1. the domain is the first keyword (in [`Domain::ALL`] order) that
//!    prefixes the line;
//! 2. without `get` the line must be exactly the domain keyword;
//! 3. `<domain>get` alone selects all fields of a data domain;
//! 4. otherwise `get` must directly follow the domain, every field keyword
//!    found anywhere in the line is recorded at its first offset, and the
//!    earliest must start right after `get`. Text between or after matched
//!    fields is ignored.
//!
//! Matched fields are ordered by offset, ties broken by catalog index.

use crate::catalog::Domain;

const GET: &str = "get";

/// Why a line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("no domain keyword prefixes the input")]
    UnknownDomain,

    #[error("unexpected text after `{0}`")]
    TrailingInput(&'static str),

    #[error("`get` must immediately follow `{0}`")]
    MisplacedGet(&'static str),

    #[error("no field of `{0}` follows `get`")]
    NoFields(&'static str),

    #[error("first field does not start right after `get`")]
    FirstFieldDetached,
}

/// A validated command: the domain plus selected catalog indices in order.
///
/// An empty field list means "all fields" for data domains. A non-empty
/// list only ever appears with a data domain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCommand {
    pub domain: Domain,
    pub fields: Vec<usize>,
}

impl ParsedCommand {
    pub fn invalid() -> Self {
        Self::default()
    }

    fn whole(domain: Domain) -> Self {
        Self {
            domain,
            fields: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.domain != Domain::Invalid
    }
}

/// Remove all whitespace and lowercase.
pub fn normalize(line: &str) -> String {
    line.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Parse a raw input line. Rejections are logged and yield `Domain::Invalid`.
pub fn parse_command(line: &str) -> ParsedCommand {
    match try_parse(&normalize(line)) {
        Ok(command) => command,
        Err(e) => {
            log::debug!("Rejected {line:?}: {e}");
            ParsedCommand::invalid()
        },
    }
}

/// Parse an already normalized line.
pub fn try_parse(input: &str) -> Result<ParsedCommand, ParseError> {
    let domain = Domain::ALL
        .into_iter()
        .skip(1)
        .find(|d| input.starts_with(d.keyword()))
        .ok_or(ParseError::UnknownDomain)?;
    let keyword = domain.keyword();

    let Some(get_at) = input.find(GET) else {
        return if input.len() == keyword.len() {
            Ok(ParsedCommand::whole(domain))
        } else {
            Err(ParseError::TrailingInput(keyword))
        };
    };

    // Control domains take no field selection.
    let Some(catalog) = domain.catalog() else {
        return Err(ParseError::TrailingInput(keyword));
    };
    if get_at != keyword.len() {
        return Err(ParseError::MisplacedGet(keyword));
    }
    let fields_start = get_at + GET.len();
    if fields_start == input.len() {
        return Ok(ParsedCommand::whole(domain));
    }

    let mut matched: Vec<(usize, usize)> = catalog
        .entries()
        .iter()
        .enumerate()
        .filter_map(|(index, spec)| input.find(spec.keyword).map(|offset| (offset, index)))
        .collect();
    matched.sort_unstable();

    match matched.first() {
        None => return Err(ParseError::NoFields(keyword)),
        Some(&(offset, _)) if offset != fields_start => {
            return Err(ParseError::FirstFieldDetached);
        },
        Some(_) => {},
    }

    Ok(ParsedCommand {
        domain,
        fields: matched.into_iter().map(|(_, index)| index).collect(),
    })
}
