use std::fmt::Display;

/// A token produced by the scanner
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
	pub r#type:  TokenType,
	pub literal: String,
	pub line:    usize,
}

impl Token {
	pub fn new(r#type: TokenType, literal: impl Into<String>, line: usize) -> Self {
		Self { r#type, literal: literal.into(), line }
	}
}

/// The different types of tokens in Monkey, the copying is lightweight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
	/// A character the scanner doesn't understand, or an unterminated string.
	Illegal,
	/// End of file/input.
	Eof,
	/// Identifier, e.g. variable or function name.
	Identifier,
	/// Integer literal, e.g. `123`.
	Integer,
	/// String literal, e.g. `"hello"`.
	StringLiteral,
	/// Assign `=`.
	Assign,
	/// Plus `+`.
	Plus,
	/// Minus `-`.
	Minus,
	/// Asterisk `*`.
	Star,
	/// Slash `/`.
	Slash,
	/// Percent `%`.
	Percent,
	/// Bitwise and `&`.
	Ampersand,
	/// Bitwise or `|`.
	Pipe,
	/// Logical and `&&`.
	And,
	/// Logical or `||`.
	Or,
	/// Bang `!`.
	Bang,
	/// Less than `<`.
	Less,
	/// Less than or equal `<=`.
	LessEqual,
	/// Greater than `>`.
	Greater,
	/// Greater than or equal `>=`.
	GreaterEqual,
	/// Equal equal `==`.
	EqualEqual,
	/// Bang equal `!=`.
	BangEqual,
	/// Comma `,`.
	Comma,
	/// Semicolon `;`.
	Semicolon,
	/// Colon `:`, separates hash keys from values.
	Colon,
	/// Left parenthesis `(`.
	LeftParen,
	/// Right parenthesis `)`.
	RightParen,
	/// Left brace `{`.
	LeftBrace,
	/// Right brace `}`.
	RightBrace,
	/// Left bracket `[`.
	LeftBracket,
	/// Right bracket `]`.
	RightBracket,
	/// Function keyword `fn`.
	Function,
	/// Variable declaration keyword.
	Let,
	/// Boolean literal `true`.
	True,
	/// Boolean literal `false`.
	False,
	/// If keyword.
	If,
	/// Else keyword.
	Else,
	/// Return statement keyword.
	Return,
}

impl TokenType {
	pub fn keyword_or_identifier(value: &str) -> Self {
		match value {
			"fn" => TokenType::Function,
			"let" => TokenType::Let,
			"true" => TokenType::True,
			"false" => TokenType::False,
			"if" => TokenType::If,
			"else" => TokenType::Else,
			"return" => TokenType::Return,
			_ => TokenType::Identifier,
		}
	}
}

impl Display for TokenType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use TokenType::*;

		#[rustfmt::skip]
		let name = match self {
			Illegal => "ILLEGAL",
			Eof => "EOF",
			Identifier => "IDENT",
			Integer => "INT",
			StringLiteral => "STRING",
			Assign => "=",
			Plus => "+",
			Minus => "-",
			Star => "*",
			Slash => "/",
			Percent => "%",
			Ampersand => "&",
			Pipe => "|",
			And => "&&",
			Or => "||",
			Bang => "!",
			Less => "<",
			LessEqual => "<=",
			Greater => ">",
			GreaterEqual => ">=",
			EqualEqual => "==",
			BangEqual => "!=",
			Comma => ",",
			Semicolon => ";",
			Colon => ":",
			LeftParen => "(",
			RightParen => ")",
			LeftBrace => "{",
			RightBrace => "}",
			LeftBracket => "[",
			RightBracket => "]",
			Function => "fn",
			Let => "let",
			True => "true",
			False => "false",
			If => "if",
			Else => "else",
			Return => "return",
		};
		write!(f, "{name}")
	}
}
