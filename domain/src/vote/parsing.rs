//! Vote choice parsing.
//!
//! Participants answer a vote prompt in free text ("2. Because the tram
//! network..."). The vote is the first run of ASCII digits anywhere in the
//! response. Pure text handling, no I/O.

/// Why a response could not be turned into a valid vote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteParseError {
    /// The response contains no digits at all.
    NoDigits,
    /// A number was found but it is not a 1-based index into the slate.
    OutOfRange { choice: usize, options: usize },
}

impl std::fmt::Display for VoteParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VoteParseError::NoDigits => write!(f, "no number found in response"),
            VoteParseError::OutOfRange { choice, options } => {
                write!(f, "choice {choice} is not between 1 and {options}")
            }
        }
    }
}

impl std::error::Error for VoteParseError {}

/// Extract the first number in `response` as a raw choice.
///
/// # Examples
///
/// ```
/// use roundtable_domain::vote::parsing::first_number;
///
/// assert_eq!(first_number("I vote for 2, it is greener."), Some(2));
/// assert_eq!(first_number("Proposal #12 wins"), Some(12));
/// assert_eq!(first_number("none of them"), None);
/// ```
pub fn first_number(response: &str) -> Option<usize> {
    let start = response.find(|c: char| c.is_ascii_digit())?;
    let digits: String = response[start..]
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    // Absurdly long digit runs saturate and are rejected by the range check.
    Some(digits.parse().unwrap_or(usize::MAX))
}

/// Parse a vote over a slate of `options` proposals (1-based).
pub fn parse_vote_choice(response: &str, options: usize) -> Result<usize, VoteParseError> {
    let choice = first_number(response).ok_or(VoteParseError::NoDigits)?;
    if choice == 0 || choice > options {
        return Err(VoteParseError::OutOfRange { choice, options });
    }
    Ok(choice)
}
