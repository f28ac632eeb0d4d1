//! Asteroid body model.
//!
//! An [`Asteroid`] binds the physical constants of a catalogued body to a
//! mesh snapshot and its precomputed [`MeshGeometry`], and exposes field
//! evaluation plus the body's spin as a function of time.
//!
//! # Units
//!
//! All quantities use km / kg / s / rad: densities in kg/km³ (the
//! catalogue converts from the usual g/cm³ by a factor of 1e12), rotation
//! rates in rad/s, semi-axes in km.
//!
//! # Catalogue
//!
//! The body catalogue is a process-wide read-only table; adding a body is
//! a code change, not a configuration option. Constructing an [`Asteroid`]
//! with a name outside the catalogue fails with
//! [`GravityError::UnknownBody`] — there is no default body.
//!
//! # Ownership
//!
//! The asteroid owns its mesh and geometry exclusively. All mutation goes
//! through [`Asteroid::update_rotation`] and [`Asteroid::update_mesh`],
//! which take `&mut self`, so the borrow checker statically excludes
//! concurrent field evaluations during a rebuild. Evaluations themselves
//! are pure `&self` reads and may run in parallel freely.

use std::f64::consts::PI;

use nalgebra::{Point3, Rotation3, Vector3};

use crate::error::{GravityError, Result};
use crate::gravity::{polyhedron_potential, GravityField, G};
use crate::mesh::{MeshGeometry, TriMesh};

/// Physical constants of a catalogued body.
#[derive(Debug, Clone, Copy)]
pub struct BodyConstants {
    /// Catalogue name.
    pub name: &'static str,
    /// Bulk density in kg/km³.
    pub density: f64,
    /// Spin rate about the body-fixed z axis in rad/s.
    pub rotation_rate: f64,
    /// Principal semi-axes in km.
    pub semi_axes: [f64; 3],
    /// Total mass in kg.
    pub mass: f64,
}

/// The fixed body catalogue.
pub const CATALOGUE: &[BodyConstants] = &[
    BodyConstants {
        name: "castalia",
        density: 2.1e12,
        rotation_rate: 2.0 * PI / (4.07 * 3600.0),
        semi_axes: [1.6130 / 2.0, 0.9810 / 2.0, 0.8260 / 2.0],
        mass: 1.4091e12,
    },
    BodyConstants {
        name: "itokawa",
        density: 1.9e12,
        rotation_rate: 2.0 * PI / (12.132 * 3600.0),
        semi_axes: [535.0 / 2.0e3, 294.0 / 2.0e3, 209.0 / 2.0e3],
        mass: 3.51e10,
    },
    BodyConstants {
        name: "eros",
        density: 2.67e12,
        rotation_rate: 2.0 * PI / (5.27 * 3600.0),
        semi_axes: [34.4, 11.7, 11.7],
        mass: 4.463e-4 / G,
    },
    // Unit test body: a 1 g/cm³ cube of side 1 km.
    BodyConstants {
        name: "cube",
        density: 1.0e12,
        rotation_rate: 1.0,
        semi_axes: [1.0, 1.0, 1.0],
        mass: 1.0,
    },
];

impl BodyConstants {
    /// Look up a body by catalogue name.
    ///
    /// # Errors
    /// Returns [`GravityError::UnknownBody`] if the name is not catalogued.
    pub fn lookup(name: &str) -> Result<&'static BodyConstants> {
        CATALOGUE
            .iter()
            .find(|body| body.name == name)
            .ok_or_else(|| GravityError::UnknownBody { name: name.to_string() })
    }
}

/// A catalogued body bound to a mesh snapshot and its derived geometry.
///
/// # Example
/// ```
/// use regolith::body::Asteroid;
/// use regolith::mesh::TriMesh;
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(-0.5, -0.5, -0.5),
///     Point3::new(-0.5, -0.5, 0.5),
///     Point3::new(-0.5, 0.5, -0.5),
///     Point3::new(-0.5, 0.5, 0.5),
///     Point3::new(0.5, -0.5, -0.5),
///     Point3::new(0.5, -0.5, 0.5),
///     Point3::new(0.5, 0.5, -0.5),
///     Point3::new(0.5, 0.5, 0.5),
/// ];
/// let faces = vec![
///     [0, 6, 4], [0, 2, 6], [0, 3, 2], [0, 1, 3],
///     [2, 7, 6], [2, 3, 7], [4, 6, 7], [4, 7, 5],
///     [0, 4, 5], [0, 5, 1], [1, 5, 7], [1, 7, 3],
/// ];
/// let mesh = TriMesh::new(vertices, faces).unwrap();
///
/// let asteroid = Asteroid::from_mesh("cube", mesh).unwrap();
/// let field = asteroid.potential(&Point3::new(10.0, 0.0, 0.0)).unwrap();
/// assert!(field.potential > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct Asteroid {
    constants: &'static BodyConstants,
    mesh: TriMesh,
    geometry: MeshGeometry,
}

impl Asteroid {
    /// Create an asteroid from raw vertex and face arrays.
    ///
    /// # Errors
    /// Fails with [`GravityError::UnknownBody`] for a name outside the
    /// catalogue, or with a mesh-validity error if the arrays do not form
    /// a closed, manifold triangulation. On error no asteroid is built.
    pub fn new(name: &str, vertices: &[Point3<f64>], faces: &[[usize; 3]]) -> Result<Self> {
        Self::from_mesh(name, TriMesh::new(vertices.to_vec(), faces.to_vec())?)
    }

    /// Create an asteroid from an existing mesh snapshot.
    pub fn from_mesh(name: &str, mesh: TriMesh) -> Result<Self> {
        let constants = BodyConstants::lookup(name)?;
        let geometry = MeshGeometry::build(&mesh)?;
        Ok(Self { constants, mesh, geometry })
    }

    /// Catalogue name of this body.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.constants.name
    }

    /// Bulk density in kg/km³.
    #[inline]
    pub fn density(&self) -> f64 {
        self.constants.density
    }

    /// Spin rate in rad/s.
    #[inline]
    pub fn rotation_rate(&self) -> f64 {
        self.constants.rotation_rate
    }

    /// Principal semi-axes in km.
    #[inline]
    pub fn semi_axes(&self) -> Vector3<f64> {
        Vector3::from(self.constants.semi_axes)
    }

    /// Catalogued total mass in kg.
    #[inline]
    pub fn mass(&self) -> f64 {
        self.constants.mass
    }

    /// The current mesh snapshot.
    #[inline]
    pub fn mesh(&self) -> &TriMesh {
        &self.mesh
    }

    /// The geometry records derived from the current mesh snapshot.
    #[inline]
    pub fn geometry(&self) -> &MeshGeometry {
        &self.geometry
    }

    /// Rotation from the body-fixed frame at epoch to the frame at `time`:
    /// a spin about the +z axis by `rotation_rate * time`.
    pub fn rotation_matrix(&self, time: f64) -> Rotation3<f64> {
        Rotation3::from_axis_angle(&Vector3::z_axis(), self.constants.rotation_rate * time)
    }

    /// The vertex positions rotated to `time`. Pure; the asteroid itself
    /// is left untouched.
    pub fn rotate_vertices(&self, time: f64) -> Vec<Point3<f64>> {
        let rotation = self.rotation_matrix(time);
        self.mesh.vertices().iter().map(|p| rotation * p).collect()
    }

    /// Rotate the owned mesh in place to its configuration at `time` and
    /// rebuild all derived geometry.
    ///
    /// This is a full recompute and is priced accordingly: call it on
    /// discrete epoch advances, never per field evaluation (evaluate in
    /// the body-fixed frame instead, via [`Asteroid::rotation_matrix`]).
    pub fn update_rotation(&mut self, time: f64) -> Result<()> {
        let vertices = self.rotate_vertices(time);
        let faces = self.mesh.faces().to_vec();
        self.update_mesh(vertices, faces)
    }

    /// Replace the owned mesh wholesale and rebuild all derived geometry.
    ///
    /// The swap is atomic: mesh and geometry are rebuilt on the side and
    /// installed together, so on error the asteroid still holds its
    /// previous consistent snapshot.
    pub fn update_mesh(&mut self, vertices: Vec<Point3<f64>>, faces: Vec<[usize; 3]>) -> Result<()> {
        let mesh = TriMesh::new(vertices, faces)?;
        let geometry = MeshGeometry::build(&mesh)?;
        self.mesh = mesh;
        self.geometry = geometry;
        Ok(())
    }

    /// Evaluate the gravitational field at a body-fixed point.
    ///
    /// # Errors
    /// Returns [`GravityError::DegenerateFieldPoint`] if the point lies on
    /// or pathologically close to the surface. The error is per call; the
    /// precomputed geometry is unaffected.
    pub fn potential(&self, point: &Point3<f64>) -> Result<GravityField> {
        polyhedron_potential(&self.mesh, &self.geometry, self.constants.density, point)
    }
}
