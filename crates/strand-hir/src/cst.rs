//! Small helpers for walking the concrete syntax tree.

use smol_str::SmolStr;
use strand_syntax::syntax::{SyntaxKind, SyntaxNode, SyntaxToken};
use text_size::TextRange;

/// First child node of `kind`.
pub(crate) fn child(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxNode> {
    node.children().find(|child| child.kind() == kind)
}

/// All child nodes of `kind`, in source order.
pub(crate) fn children(node: &SyntaxNode, kind: SyntaxKind) -> impl Iterator<Item = SyntaxNode> {
    node.children().filter(move |child| child.kind() == kind)
}

/// Child expression nodes, in source order.
pub(crate) fn exprs(node: &SyntaxNode) -> impl Iterator<Item = SyntaxNode> {
    node.children().filter(|child| child.kind().is_expr())
}

/// First direct token of `kind`.
pub(crate) fn token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|element| element.into_token())
        .find(|token| token.kind() == kind)
}

/// First non-trivia direct token.
pub(crate) fn first_token(node: &SyntaxNode) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|element| element.into_token())
        .find(|token| !token.kind().is_trivia())
}

/// Identifier text and range of a `Name` or `NameRef` node.
pub(crate) fn ident(node: &SyntaxNode) -> Option<(SmolStr, TextRange)> {
    token(node, SyntaxKind::Ident).map(|token| (SmolStr::new(token.text()), token.text_range()))
}

/// Identifier of the first `Name` child (the declared name of an item).
pub(crate) fn declared_name(node: &SyntaxNode) -> Option<(SmolStr, TextRange)> {
    child(node, SyntaxKind::Name).and_then(|name| ident(&name))
}
