//! CLI argument definitions for `floom`.

use clap::{Args, Parser, Subcommand};

/// Form schema builder and runner.
#[derive(Parser)]
#[command(name = "floom", version, about = "Build, run, and save form schemas")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global flags available to every subcommand.
#[derive(Args)]
pub struct GlobalArgs {
    /// Output JSON instead of human-readable text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to the .formloom directory (overrides discovery).
    #[arg(long, global = true, value_name = "DIR")]
    pub dir: Option<String>,

    /// Verbose logging to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a .formloom directory.
    Init(InitArgs),

    /// Add a field to the working form.
    Add(AddArgs),

    /// List the fields of the working form.
    List,

    /// Show one field of the working form in detail.
    Show(ShowArgs),

    /// Edit a field of the working form.
    Edit(EditArgs),

    /// Delete a field from the working form.
    Delete(DeleteArgs),

    /// Move a field to a new position in the working form.
    Move(MoveArgs),

    /// Run a form instance: set values, validate, compute derived fields.
    Fill(FillArgs),

    /// Save the working form as a named schema.
    Save(SaveArgs),

    /// Load a saved schema into the working form.
    Load(LoadArgs),

    /// Clear the working form.
    Clear,

    /// List saved forms.
    Forms,

    /// Delete a saved schema.
    Drop(DropArgs),

    /// Print version information.
    Version,
}

#[derive(Args)]
pub struct InitArgs {
    /// Directory to initialize in (defaults to the current directory).
    pub path: Option<String>,
}

#[derive(Args)]
pub struct AddArgs {
    /// Field label.
    pub label: String,

    /// Field type: text, number, textarea, select, radio, checkbox, date.
    #[arg(short = 't', long = "type", default_value = "text")]
    pub field_type: String,

    /// Mark the field required (display-level; enforcement needs a
    /// `required` rule).
    #[arg(short, long)]
    pub required: bool,

    /// Default value.
    #[arg(short, long, value_name = "VALUE")]
    pub default: Option<String>,

    /// Option for select/radio/checkbox fields (repeatable).
    #[arg(short, long = "option", value_name = "OPTION")]
    pub options: Vec<String>,

    /// Validation rule spec TYPE[:VALUE[:MESSAGE]] (repeatable), e.g.
    /// "required", "minLength:5", "maxLength:20:Keep it short".
    #[arg(long = "rule", value_name = "SPEC")]
    pub rules: Vec<String>,

    /// Field id this field derives its value from (repeatable).
    #[arg(long = "derived-from", value_name = "FIELD_ID")]
    pub derived_from: Vec<String>,

    /// Derivation formula text (e.g. "age from birthdate").
    #[arg(long, value_name = "TEXT")]
    pub formula: Option<String>,

    /// Explicit derivation kind (e.g. "age_from_date"); inferred from the
    /// formula text when omitted.
    #[arg(long, value_name = "KIND")]
    pub derivation: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Field id.
    pub id: String,
}

#[derive(Args)]
pub struct EditArgs {
    /// Field id.
    pub id: String,

    /// New label.
    #[arg(long)]
    pub label: Option<String>,

    /// New field type.
    #[arg(short = 't', long = "type")]
    pub field_type: Option<String>,

    /// New required marker.
    #[arg(long, value_name = "BOOL")]
    pub required: Option<bool>,

    /// New default value.
    #[arg(short, long, value_name = "VALUE")]
    pub default: Option<String>,

    /// Replace the option list (repeatable).
    #[arg(short, long = "option", value_name = "OPTION")]
    pub options: Vec<String>,

    /// Replace the rule chain (repeatable TYPE[:VALUE[:MESSAGE]] specs).
    #[arg(long = "rule", value_name = "SPEC")]
    pub rules: Vec<String>,

    /// Drop every validation rule.
    #[arg(long, conflicts_with = "rules")]
    pub clear_rules: bool,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Field id.
    pub id: String,
}

#[derive(Args)]
pub struct MoveArgs {
    /// Current position of the field (0-based).
    pub source: usize,

    /// Position to move it to (0-based).
    pub destination: usize,
}

#[derive(Args)]
pub struct FillArgs {
    /// Run a saved schema instead of the working form.
    #[arg(long = "form", value_name = "FORM_ID")]
    pub form_id: Option<String>,

    /// Set a field value, addressed by id or label (repeatable).
    #[arg(short, long = "set", value_name = "FIELD=VALUE")]
    pub sets: Vec<String>,

    /// Validate every field after applying the values.
    #[arg(long)]
    pub submit: bool,
}

#[derive(Args)]
pub struct SaveArgs {
    /// Name for the saved schema.
    pub name: String,
}

#[derive(Args)]
pub struct LoadArgs {
    /// Saved schema id.
    pub id: String,
}

#[derive(Args)]
pub struct DropArgs {
    /// Saved schema id.
    pub id: String,
}
