pub mod assembler;
pub mod batch;
pub mod diagram;
pub mod engine;
pub mod inversion;
pub mod mixture;
pub mod serialization;
pub mod splitting;

mod traits;

pub use assembler::CompositionAssembler;
pub use diagram::CharacterizationDiagram;
pub use engine::{Characterization, SurrogateEngine, compute_output_composition};
pub use inversion::{InversionSolution, LinearInversionSolver, SolverSettings};
pub use mixture::{MixtureBuilder, MixtureComponent, ReferenceMixture};
pub use splitting::{SplittingParameterModel, SplittingParameters};
pub use traits::SurrogateModel;
