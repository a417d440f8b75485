use std::ffi::OsString;

use clap::Parser;

use renv_core::{
    DEFAULT_KEYVAL_SEPARATOR, DEFAULT_MAP_SEPARATOR, RankScope, RankSource, Request, Separators,
};

const EXAMPLES: &str = r#"Examples:
  Set environment variable ABC to 0 for task 0 and 1 for task 1:
  $ srun -n 2 renv ABC env | grep ABC
  ABC=0
  ABC=1

  Set environment variable CUDA_VIS to 3 for rank 0 and 2 for rank 1:
  $ srun -n 2 renv --map '0:3,1:2' CUDA_VIS env | grep CUDA_VIS

  Combine both examples by stacking renv:
  $ srun -n 1 renv ABC renv --map '0:2,1:2' CUDA_VIS env | grep 'CUDA_VIS\|ABC'"#;

#[derive(Parser, Debug)]
#[command(name = "renv", version)]
#[command(about = "renv: Set environment variables specific to MPI rank.", long_about = None)]
#[command(after_help = EXAMPLES)]
pub struct Cli {
    /// Environment variable to set
    #[arg(value_name = "ENVVAR")]
    pub envvar: String,

    /// Use global rank indices; default: node-local indices
    #[arg(short, long)]
    pub global: bool,

    #[arg(short, long, value_enum, default_value_t = RankSource::Slurm, hide = true)]
    pub source: RankSource,

    /// Overwrite existing env var
    #[arg(short, long)]
    pub force: bool,

    /// Separator for individual map entries; overwrite globally with RENV_SEPARATOR_MAP
    #[arg(long, env = "RENV_SEPARATOR_MAP", default_value = DEFAULT_MAP_SEPARATOR, hide_env = true)]
    pub separator_map: String,

    /// Separator for key-value-pairs (key<sep>val) in the map entries; overwrite globally with RENV_SEPARATOR_KEYVAL
    #[arg(long, env = "RENV_SEPARATOR_KEYVAL", default_value = DEFAULT_KEYVAL_SEPARATOR, hide_env = true)]
    pub separator_keyval: String,

    /// dict-like string to map task IDs to values; example: --map "1:ABC,2:DEF"
    #[arg(short, long)]
    pub map: Option<String>,

    /// Command to run under new environment; renv can be stacked
    #[arg(value_name = "CMD", trailing_var_arg = true, allow_hyphen_values = true)]
    pub cmd: Vec<OsString>,
}

impl Cli {
    pub fn request(&self) -> Request {
        Request {
            var: self.envvar.clone(),
            source: self.source,
            scope: RankScope::from_global_flag(self.global),
            force: self.force,
            map: self.map.clone(),
            separators: Separators::new(&self.separator_map, &self.separator_keyval),
        }
    }
}
