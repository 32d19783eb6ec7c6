//! Plot-ready Van Krevelen data (carbon vs. hydrogen mass fraction) for a
//! characterized sample.

use super::engine::Characterization;
use crate::common::species::{ReferenceSpecies, SPECIES_TABLE};
use crate::domain::MixtureRole;
use serde::Serialize;

pub const DEFAULT_CARBON_AXIS: [f64; 2] = [0.43, 0.77];
pub const DEFAULT_HYDROGEN_AXIS: [f64; 2] = [0.02, 0.12];

const BARYCENTRIC_TOLERANCE: f64 = 1.0e-12;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DiagramPoint {
    pub carbon: f64,
    pub hydrogen: f64,
}

impl DiagramPoint {
    pub const fn new(carbon: f64, hydrogen: f64) -> Self {
        Self { carbon, hydrogen }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DiagramSegment {
    pub from: DiagramPoint,
    pub to: DiagramPoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisWindow {
    pub carbon: [f64; 2],
    pub hydrogen: [f64; 2],
}

impl Default for AxisWindow {
    fn default() -> Self {
        Self {
            carbon: DEFAULT_CARBON_AXIS,
            hydrogen: DEFAULT_HYDROGEN_AXIS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MixtureVertex {
    pub role: MixtureRole,
    #[serde(flatten)]
    pub point: DiagramPoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpeciesPoint {
    pub species: ReferenceSpecies,
    #[serde(flatten)]
    pub point: DiagramPoint,
}

/// Line from a member species to the mixture vertex it contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConnectionSegment {
    pub species: ReferenceSpecies,
    pub mixture: MixtureRole,
    #[serde(flatten)]
    pub segment: DiagramSegment,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterizationDiagram {
    pub axes: AxisWindow,
    pub vertices: [MixtureVertex; 3],
    /// RM1-RM2, RM2-RM3, RM3-RM1.
    pub edges: [DiagramSegment; 3],
    pub species: Vec<SpeciesPoint>,
    pub connections: Vec<ConnectionSegment>,
    pub sample: DiagramPoint,
    pub sample_inside: bool,
}

impl CharacterizationDiagram {
    pub fn from_characterization(characterization: &Characterization) -> Self {
        let vertices = characterization.mixtures.each_ref().map(|mixture| MixtureVertex {
            role: mixture.role(),
            point: DiagramPoint::new(mixture.carbon_fraction(), mixture.hydrogen_fraction()),
        });
        let [a, b, c] = vertices.map(|vertex| vertex.point);
        let edges = [
            DiagramSegment { from: a, to: b },
            DiagramSegment { from: b, to: c },
            DiagramSegment { from: c, to: a },
        ];

        let species = SPECIES_TABLE
            .iter()
            .map(|record| SpeciesPoint {
                species: record.species,
                point: DiagramPoint::new(record.carbon_fraction, record.hydrogen_fraction),
            })
            .collect();

        let connections = characterization
            .mixtures
            .iter()
            .zip(vertices)
            .flat_map(|(mixture, vertex)| {
                mixture.composition().iter().map(move |component| {
                    let record = component.species.record();
                    ConnectionSegment {
                        species: component.species,
                        mixture: vertex.role,
                        segment: DiagramSegment {
                            from: DiagramPoint::new(record.carbon_fraction, record.hydrogen_fraction),
                            to: vertex.point,
                        },
                    }
                })
            })
            .collect();

        let composition = characterization.sample.composition();
        let sample = DiagramPoint::new(composition.carbon(), composition.hydrogen());

        Self {
            axes: AxisWindow::default(),
            vertices,
            edges,
            species,
            connections,
            sample,
            sample_inside: point_in_triangle(sample, [a, b, c]),
        }
    }
}

/// Barycentric containment test; points on an edge count as inside. A
/// degenerate triangle contains nothing.
pub fn point_in_triangle(point: DiagramPoint, triangle: [DiagramPoint; 3]) -> bool {
    let [a, b, c] = triangle;
    let denominator = (b.hydrogen - c.hydrogen) * (a.carbon - c.carbon)
        + (c.carbon - b.carbon) * (a.hydrogen - c.hydrogen);
    if denominator.abs() <= f64::EPSILON * f64::EPSILON {
        return false;
    }

    let first = ((b.hydrogen - c.hydrogen) * (point.carbon - c.carbon)
        + (c.carbon - b.carbon) * (point.hydrogen - c.hydrogen))
        / denominator;
    let second = ((c.hydrogen - a.hydrogen) * (point.carbon - c.carbon)
        + (a.carbon - c.carbon) * (point.hydrogen - c.hydrogen))
        / denominator;
    let third = 1.0 - first - second;

    [first, second, third]
        .iter()
        .all(|weight| *weight >= -BARYCENTRIC_TOLERANCE)
}

#[cfg(test)]
mod tests {
    use super::{CharacterizationDiagram, DiagramPoint, point_in_triangle};
    use crate::common::species::ReferenceSpecies;
    use crate::domain::{BiomassClass, MixtureRole, Sample};
    use crate::modules::engine::compute_output_composition;

    fn diagram_for(carbon: f64, hydrogen: f64) -> CharacterizationDiagram {
        let sample = Sample::create(carbon, hydrogen, 0.0, 0.0)
            .expect("sample")
            .with_biomass_class(BiomassClass::Hardwood);
        let characterization = compute_output_composition(&sample).expect("characterization");
        CharacterizationDiagram::from_characterization(&characterization)
    }

    #[test]
    fn diagram_contains_every_plot_element() {
        let diagram = diagram_for(0.53, 0.06);

        assert_eq!(diagram.species.len(), 7);
        assert_eq!(diagram.connections.len(), 8);
        assert_eq!(diagram.edges[0].to, diagram.edges[1].from);
        assert_eq!(diagram.edges[2].to, diagram.edges[0].from);
        assert_eq!(diagram.axes.carbon, [0.43, 0.77]);
        assert_eq!(diagram.sample, DiagramPoint::new(0.53, 0.06));
        assert!(diagram.sample_inside);

        let lignin_c_targets: Vec<MixtureRole> = diagram
            .connections
            .iter()
            .filter(|connection| connection.species == ReferenceSpecies::LigninC)
            .map(|connection| connection.mixture)
            .collect();
        assert_eq!(lignin_c_targets, vec![MixtureRole::Rm2, MixtureRole::Rm3]);
    }

    #[test]
    fn sample_outside_triangle_is_flagged() {
        assert!(!diagram_for(0.30, 0.02).sample_inside);
    }

    #[test]
    fn triangle_test_accepts_vertices_and_rejects_degenerate_shapes() {
        let triangle = [
            DiagramPoint::new(0.0, 0.0),
            DiagramPoint::new(1.0, 0.0),
            DiagramPoint::new(0.0, 1.0),
        ];
        assert!(point_in_triangle(DiagramPoint::new(0.0, 0.0), triangle));
        assert!(point_in_triangle(DiagramPoint::new(0.5, 0.5), triangle));
        assert!(point_in_triangle(DiagramPoint::new(0.2, 0.2), triangle));
        assert!(!point_in_triangle(DiagramPoint::new(0.6, 0.6), triangle));

        let collinear = [
            DiagramPoint::new(0.0, 0.0),
            DiagramPoint::new(0.5, 0.5),
            DiagramPoint::new(1.0, 1.0),
        ];
        assert!(!point_in_triangle(DiagramPoint::new(0.5, 0.5), collinear));
    }

    #[test]
    fn diagram_serializes_with_camel_case_keys() {
        let value = serde_json::to_value(diagram_for(0.53, 0.06)).expect("json");
        assert_eq!(value["sampleInside"], serde_json::Value::Bool(true));
        assert_eq!(value["vertices"][0]["role"], "RM1");
        assert!(value["vertices"][0]["carbon"].is_f64());
        assert_eq!(value["connections"][0]["species"], "CELL");
    }
}
