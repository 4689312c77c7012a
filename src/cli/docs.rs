//! Documentation content for the treexl CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Syntax,
    Operators,
    Sql,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "syntax" => Some(Self::Syntax),
            "operators" | "ops" => Some(Self::Operators),
            "sql" | "where" => Some(Self::Sql),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"TREEXL DOCUMENTATION

Treexl is a small filter-expression language. Expressions compare columns,
literals and named parameters, and compile to SQL WHERE fragments.

DOCUMENTATION CATEGORIES

  syntax            Literals, identifiers, parameters, calls and grouping
  operators         Logical, equality, comparison, membership and unary operators
  sql               How expressions render as SQL and how parameters are collected

QUICK REFERENCE

  status = 'open' and priority >= 2
  owner.name like 'A%'
  id in (1, 4, 10)
  age in 18..65
  created > :since
  not archived = 1 or lower(name) = 'x'

Run 'treexl doc <category>' for detailed documentation.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    match DocCategory::from_name(name) {
        Some(DocCategory::Syntax) => Ok(SYNTAX_DOC),
        Some(DocCategory::Operators) => Ok(OPERATORS_DOC),
        Some(DocCategory::Sql) => Ok(SQL_DOC),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

const SYNTAX_DOC: &str = r#"SYNTAX - Building Blocks

LITERALS
  42          Integer
  1.50        Decimal (scale is kept: 1.50 renders as 1.50)
  'text'      String, single quotes only, may span lines
  true false  Booleans (parse, but have no SQL rendering)
  null

IDENTIFIERS
  name
  customer.address.city
    Letters, digits and underscores, not starting with a digit. Dotted paths
    fold into a single name.

PARAMETERS
  :since
    A named placeholder. ':' must be immediately followed by an identifier.

CALLS
  lower(name)
  schema.fn(a, 'b', 3)
    A name followed by '(' is a function call. Arguments may be empty.

GROUPING
  (a = 1 or b = 2) and c = 3

KEYWORDS
  and or not is in like true false null
    Keywords are lower case only. 'AND' is an identifier, and the error
    message says so when it gets in the way.
"#;

const OPERATORS_DOC: &str = r#"OPERATORS - Lowest to Highest Precedence

  or                          left associative
  and                         left associative
  =  <>  is  in  like         left associative
  >  >=  <  <=                left associative
  not  -                      prefix, right associative

MEMBERSHIP
  x in (1, 2, 3)              value list
  x in 1..10                  inclusive range

  'between' is reserved and rejected: write 'x in 1..10' instead.

NULL CHECKS
  x is null
  x is not null
"#;

const SQL_DOC: &str = r#"SQL - WHERE Rendering

  a = 1 and b <> 'x'          a = 1 and b <> 'x'
  id in (1, 4, 10)            id in (1, 4, 10)
  age in 18..65               age between 18 and 65
  created > :since            created > ${since}
  not a = 1                   not a = 1
  - -1                        - -1 (never --, which starts a comment)
  (a or b) and c              (a or b) and c

Quotes inside strings are escaped with '' by default, or \' with
--quote-style backslash.

PARAMETERIZE
  treexl sql --parameterize "A > 1 and B <> '2'"
    {"sql":"A > ${_1} and B <> ${_2}","params":[1,"2"]}

  Every literal becomes a parameter named _1, _2, ... in source order.

LIMITS
  Boolean literals and value lists outside 'in' cannot be rendered.
"#;
