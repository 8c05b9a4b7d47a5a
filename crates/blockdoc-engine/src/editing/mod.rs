/*!
 * # Editing Core
 *
 * An open document is a [`Document`]: header metadata plus a [`BlockTree`]
 * owned exclusively by the editing session.
 *
 * ## Command-Based Editing
 * - All structural edits are **Commands** (`Cmd` enum) applied through
 *   `Document::apply`
 * - Each command maps onto one `BlockTree` operation returning whether it
 *   changed anything
 * - Effective changes bump the document **version** and come back as a
 *   [`Patch`] listing the touched block ids
 * - Invalid targets are silent no-ops; nothing here returns an error
 *
 * ## Stable Block IDs
 * Every block carries a `BlockId` assigned at creation. Commands address
 * blocks by id, never by position, so a UI can hold on to ids across edits.
 *
 * ## Module Structure
 *
 * - **`document`**: `Document`, the command dispatcher and version counter
 * - **`commands`**: `Cmd`, `BlockPatch` and the tree mutation operations
 * - **`patch`**: edit result metadata
 * - **`snapshot`**: id-free text outline for tests and terminal output
 *
 * ## Usage Pattern
 *
 * ```rust
 * use blockdoc_engine::editing::*;
 *
 * let mut doc = Document::from_bytes(b"- first\n- second\n");
 * let second = doc.blocks()[1].id;
 *
 * let patch = doc.apply(Cmd::Indent { id: second });
 * assert_eq!(patch.version, 1);
 *
 * let outline = format_outline(doc.tree());
 * assert_eq!(outline, "Bullet \"first\"\n  Bullet \"second\"\n");
 * ```
 *
 * [`BlockTree`]: crate::models::BlockTree
 */

pub mod commands;
pub mod document;
pub mod patch;
pub mod snapshot;

pub use commands::{BlockPatch, Cmd, Placement};
pub use document::Document;
pub use patch::Patch;
pub use snapshot::{describe, format_outline};
