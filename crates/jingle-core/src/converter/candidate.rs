//! ICE candidate attribute grammar
//!
//! ```text
//! <foundation> <component> <protocol> <priority> <ip> <port> typ <type>
//!     [raddr <addr> rport <port>] [generation <n>] [<ext-name> <ext-value>]*
//! ```
//!
//! The candidate type decides the layout: host candidates go straight to
//! `generation`, every other type must carry `raddr`/`rport` first.

use std::str::FromStr;

use tracing::trace;

use crate::error::{JingleError, Result};
use crate::model::{Candidate, CandidateType};

const MIN_TOKENS: usize = 8;

fn number<T: FromStr>(candidate: &str, token: &str, what: &str) -> Result<T> {
    token
        .parse::<T>()
        .map_err(|_| JingleError::malformed_candidate(candidate, format!("invalid {} '{}'", what, token)))
}

/// Parse the value of an `a=candidate` attribute
pub fn parse_candidate(value: &str) -> Result<Candidate> {
    let tokens: Vec<&str> = value.split_whitespace().collect();
    if tokens.len() < MIN_TOKENS {
        return Err(JingleError::malformed_candidate(
            value,
            format!("expected at least {} tokens, found {}", MIN_TOKENS, tokens.len()),
        ));
    }
    if tokens[6] != "typ" {
        return Err(JingleError::malformed_candidate(value, "missing 'typ' keyword"));
    }

    let candidate_type = tokens[7]
        .parse::<CandidateType>()
        .map_err(|_| JingleError::malformed_candidate(value, format!("unknown candidate type '{}'", tokens[7])))?;

    let mut rest = &tokens[MIN_TOKENS..];
    let (rel_addr, rel_port) = if candidate_type.has_related_address() {
        match rest {
            ["raddr", addr, "rport", port, tail @ ..] => {
                rest = tail;
                (Some(addr.to_string()), Some(number::<u16>(value, port, "rport")?))
            }
            _ => {
                return Err(JingleError::malformed_candidate(
                    value,
                    format!("{} candidate without raddr/rport", candidate_type),
                ))
            }
        }
    } else {
        (None, None)
    };

    let mut generation = 0;
    while let [name, extension, tail @ ..] = rest {
        if *name == "generation" {
            generation = number(value, extension, "generation")?;
        } else {
            trace!(name, value = extension, "ignoring candidate extension");
        }
        rest = tail;
    }
    if !rest.is_empty() {
        return Err(JingleError::malformed_candidate(value, "dangling token after candidate fields"));
    }

    Ok(Candidate {
        component: number(value, tokens[1], "component")?,
        foundation: tokens[0].to_string(),
        generation,
        id: None,
        ip: tokens[4].to_string(),
        port: number(value, tokens[5], "port")?,
        priority: number(value, tokens[3], "priority")?,
        protocol: tokens[2].to_lowercase(),
        candidate_type,
        rel_addr,
        rel_port,
    })
}

/// Format a candidate as the value of an `a=candidate` attribute
///
/// A non-host candidate without a related address cannot be written in the
/// layout `parse_candidate` reads back, so it is rejected.
pub fn format_candidate(candidate: &Candidate) -> Result<String> {
    let mut value = format!(
        "{} {} {} {} {} {} typ {}",
        candidate.foundation,
        candidate.component,
        candidate.protocol,
        candidate.priority,
        candidate.ip,
        candidate.port,
        candidate.candidate_type
    );
    if candidate.candidate_type.has_related_address() {
        match (&candidate.rel_addr, candidate.rel_port) {
            (Some(addr), Some(port)) => value.push_str(&format!(" raddr {} rport {}", addr, port)),
            _ => {
                return Err(JingleError::malformed_candidate(
                    value,
                    format!("{} candidate without raddr/rport", candidate.candidate_type),
                ))
            }
        }
    }
    value.push_str(&format!(" generation {}", candidate.generation));
    Ok(value)
}
