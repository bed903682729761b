//! Documentation content for the cohort-rule CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Syntax,
    Operators,
    Functions,
    Errors,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "syntax" => Some(Self::Syntax),
            "operators" | "ops" => Some(Self::Operators),
            "functions" | "function" | "fn" => Some(Self::Functions),
            "errors" | "error" => Some(Self::Errors),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"COHORT RULE DOCUMENTATION

Cohort rules are boolean filters over participant records. A rule compares
record fields with values and joins comparisons with 'and' / 'or'.

DOCUMENTATION CATEGORIES

  syntax            Terms, variables, grouping and precedence
  operators         Comparison and logical operators
  functions         Function calls and bare predicates
  errors            What the parser rejects and why

QUICK REFERENCE

  {age} >= 18                         Comparison
  {enrollee.consented} = true         Variable path
  'female'  "female"                  Strings
  a and b   a or b   !a               Logical operators
  ( ... )                             Grouping
  lower({profile.name})               Function call
  include({family.shortcode})         Function as a whole filter

Run 'cohort-rule doc <category>' for detailed documentation.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    match DocCategory::from_str(name) {
        Some(DocCategory::Syntax) => Ok(SYNTAX_DOC),
        Some(DocCategory::Operators) => Ok(OPERATORS_DOC),
        Some(DocCategory::Functions) => Ok(FUNCTIONS_DOC),
        Some(DocCategory::Errors) => Ok(ERRORS_DOC),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

const SYNTAX_DOC: &str = r#"SYNTAX - Rule Structure

TERMS
  Numbers     18   2.5   -1
  Strings     'female'   "it's"   (escapes: \\ \' \" \n \t \r)
  Booleans    true   false
  Null        null
  Variables   {age}   {profile.sexAtBirth}   {task.demographics.status}

  Variable paths are dot-separated segments of letters, digits, '_' and
  '-'. The parser does not check that a path exists.

COMPARISONS
  <term> <operator> <term>

  Exactly one operator per comparison:
    {age} >= 18                 valid
    {a} = {b} = {c}             rejected

GROUPING AND PRECEDENCE
  'and' binds tighter than 'or'; both group left to right.

    {a} = 1 or {b} = 2 and {c} = 3
      reads as  {a} = 1 or ({b} = 2 and {c} = 3)

  Parentheses override precedence and may nest up to 256 levels
  (see --max-depth).

EXAMPLES
  ({age} >= 18 and {age} <= 65) or {profile.sexAtBirth} = 'female'
  {enrollee.subject} = true and {enrollee.consented} = true
"#;

const OPERATORS_DOC: &str = r#"OPERATORS

COMPARISON
  =   (also ==)     Equal
  !=                Not equal
  <   <=            Less than (or equal)
  >   >=            Greater than (or equal)
  contains          Substring / membership

LOGICAL
  and               Both sides hold
  or                Either side holds
  !                 Negation of the following atom

  Negation applies to a single atom:
    !{a} = 1 and {b} = 2       reads as  (!{a} = 1) and {b} = 2
    !({a} = 1 and {b} = 2)     negates the whole group
"#;

const FUNCTIONS_DOC: &str = r#"FUNCTIONS

CALLS
  name(<term>, <term>, ...)

  A call takes one or more terms. The name must be followed directly by
  '(' with no space. Arguments may themselves be calls:
    max({age}, min({a}, {b}))

  Which functions exist is decided by the system evaluating the rule,
  not by the parser. Common ones:
    lower(x)   trim(x)   min(x, ...)   max(x, ...)

AS A COMPARISON TERM
  lower({profile.name}) contains 'smith'

AS A WHOLE FILTER
  A call not followed by an operator stands on its own:
    include({family.shortcode})
    include({family.shortcode}) or {age} > 90
"#;

const ERRORS_DOC: &str = r#"ERRORS

Rules are all-or-nothing: any error rejects the whole rule, and a rule
that fails to parse must not be saved or evaluated.

LEXICAL ERRORS
  unexpected character          {age} ~ 3
  unterminated string           {name} = 'abc
  invalid escape sequence       {name} = 'a\q'
  invalid variable path         {a..b} = 1
  bare identifier               age = 3          (use {age})
  invalid number                a number too large to represent

PARSE ERRORS
  empty rule                    ''
  unexpected token              {age} >=
  unclosed '('                  ({age} = 1
  call without arguments        include()
  nesting too deep              more than --max-depth levels
  trailing input                {a} = 1 {b}      {a} = 1 = 2

Every error reports the character offset where it was detected.
"#;
