pub const DOC_CONTEXT: char = '$';

pub const OPEN_SQUARE_BRACKET: char = '[';
pub const CLOSE_SQUARE_BRACKET: char = ']';
pub const OPEN_BRACE: char = '{';
pub const CLOSE_BRACE: char = '}';

pub const WILDCARD: char = '*';
pub const PERIOD: char = '.';
pub const SPACE: char = ' ';
pub const TAB: char = '\t';
pub const CR: char = '\r';
pub const LF: char = '\n';
pub const COMMA: char = ',';
pub const COLON: char = ':';
pub const MINUS: char = '-';
pub const PLUS: char = '+';
pub const UNDERSCORE: char = '_';
pub const SINGLE_QUOTE: char = '\'';
pub const DOUBLE_QUOTE: char = '"';
pub const ESCAPE: char = '\\';
