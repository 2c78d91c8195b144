/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The `Node` trait, `Program` and the `Stmt`/`Expr` enums
/// - expressions: Expression nodes and operators
/// - statements: Statement nodes
pub mod ast;
pub mod expressions;
pub mod statements;
