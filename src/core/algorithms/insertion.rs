//! Point insertion.
//!
//! Three entry paths share the split/legalize machinery:
//!
//! - [`Mesh::add_interior_point`] locates the containing triangle and splits
//!   it into three (or, for a point landing on an edge, splits the edge's
//!   two triangles into four), then legalizes with the new vertex as focus.
//! - Points outside the hull fall through to exterior extension: the new
//!   vertex is attached to the best visible boundary edge as one new
//!   triangle.
//! - [`Mesh::add_perimeter_point`] streams boundary points: the first three
//!   non-collinear ones seed the initial triangle, later ones extend the
//!   hull.
//!
//! Every path restores the pre-call mesh on error.

use crate::core::edge::EdgeKey;
use crate::core::mesh::{Mesh, TriangulationError};
use crate::core::triangle::TriangleKey;
use crate::core::vertex::VertexKey;
use crate::geometry::point::Point;
use crate::geometry::predicates::{orientation, point_on_segment, Orientation};
use tracing::debug;

impl Mesh {
    /// Inserts a point into the triangulated domain, splitting the
    /// containing triangle and restoring the Delaunay property.
    ///
    /// A point matching an existing vertex within ε is a no-op returning
    /// that vertex. A point on an existing edge splits the edge's incident
    /// triangles into four. A point outside the hull is attached through
    /// exterior extension. If the mesh still has no triangles, the stored
    /// perimeter is triangulated first.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when there is no triangulation and the perimeter
    /// cannot seed one; `NumericLimit` when legalization exceeds the
    /// configured cap. On error the mesh is unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cdt2d::core::mesh::Mesh;
    /// use cdt2d::geometry::point::Point;
    ///
    /// let mut mesh = Mesh::from_polygon(&[
    ///     Point::new(0.0, 0.0),
    ///     Point::new(4.0, 0.0),
    ///     Point::new(4.0, 4.0),
    ///     Point::new(0.0, 4.0),
    /// ])
    /// .unwrap();
    /// let v = mesh.add_interior_point(Point::new(1.0, 2.0)).unwrap();
    /// // Re-inserting is a structural no-op.
    /// let again = mesh.add_interior_point(Point::new(1.0, 2.0)).unwrap();
    /// assert_eq!(v, again);
    /// ```
    pub fn add_interior_point(&mut self, p: Point) -> Result<VertexKey, TriangulationError> {
        if let Some(v) = self.find_vertex(p) {
            return Ok(v);
        }
        let checkpoint = self.clone();
        match self.insert_point(p) {
            Ok(v) => {
                self.debug_validate();
                Ok(v)
            }
            Err(err) => {
                *self = checkpoint;
                Err(err)
            }
        }
    }

    /// Appends a point to the perimeter sequence and works it into the
    /// mesh: recorded only while fewer than three (non-collinear) points
    /// exist, seeding the first triangle when one appears, extending the
    /// hull afterwards.
    ///
    /// # Errors
    ///
    /// Propagates extension and legalization failures; the mesh is restored
    /// on error.
    pub fn add_perimeter_point(&mut self, p: Point) -> Result<VertexKey, TriangulationError> {
        let checkpoint = self.clone();
        match self.insert_perimeter_point(p) {
            Ok(v) => {
                self.debug_validate();
                Ok(v)
            }
            Err(err) => {
                *self = checkpoint;
                Err(err)
            }
        }
    }

    fn insert_point(&mut self, p: Point) -> Result<VertexKey, TriangulationError> {
        if self.number_of_triangles() == 0 {
            self.triangulate_perimeter()?;
        }
        match self.locate(p) {
            Some(t) => {
                // A point within ε of one of the triangle's edges splits the
                // edge rather than the face.
                for e in self.try_triangle(t)?.edges() {
                    let [pa, pb] = self.edge_points(e)?;
                    if point_on_segment(pa, pb, p, self.epsilon()) {
                        return self.split_edge(e, p);
                    }
                }
                self.split_triangle(t, p)
            }
            None => {
                let v = self.insert_vertex(p);
                self.extend_mesh(v)?;
                Ok(v)
            }
        }
    }

    fn insert_perimeter_point(&mut self, p: Point) -> Result<VertexKey, TriangulationError> {
        let v = self.insert_vertex(p);
        self.push_perimeter(v);

        if self.number_of_triangles() > 0 {
            // A repeated point is already woven in; a new one is exterior.
            if self.try_vertex(v)?.degree() == 0 {
                self.extend_mesh(v)?;
            }
            return Ok(v);
        }

        // Not populated yet: seed once three non-collinear perimeter
        // vertices exist, then fold in any earlier collinear run.
        let mut unique: Vec<VertexKey> = Vec::new();
        for &k in self.perimeter() {
            if !unique.contains(&k) {
                unique.push(k);
            }
        }
        // A repeated point cannot be the one that breaks collinearity.
        if unique.len() < 3 || unique.last() != Some(&v) {
            return Ok(v);
        }
        let (a, b) = (unique[0], unique[1]);
        let pa = self.try_point(a)?;
        let pb = self.try_point(b)?;
        if orientation(pa, pb, self.try_point(v)?, self.epsilon()) == Orientation::DEGENERATE {
            // Still a collinear chain; keep waiting.
            return Ok(v);
        }

        let ab = self.insert_edge(a, b)?;
        let bv = self.insert_edge(b, v)?;
        let av = self.insert_edge(a, v)?;
        self.insert_triangle(ab, bv, av)?;
        debug!(%p, "seeded initial triangle from perimeter stream");

        for w in unique.into_iter().skip(2) {
            if w != v && self.try_vertex(w)?.degree() == 0 {
                self.extend_mesh(w)?;
            }
        }
        Ok(v)
    }

    /// Splits triangle `t` at interior point `p` into three triangles and
    /// legalizes the original rim with the new vertex as focus.
    pub(crate) fn split_triangle(
        &mut self,
        t: TriangleKey,
        p: Point,
    ) -> Result<VertexKey, TriangulationError> {
        let tri = self.try_triangle(t)?.clone();
        let [a, b, c] = tri.vertices();
        let [ab, bc, ca] = tri.edges();

        self.remove_triangle(t)?;
        let v = self.insert_vertex(p);
        let av = self.insert_edge(a, v)?;
        let bv = self.insert_edge(b, v)?;
        let cv = self.insert_edge(c, v)?;
        self.insert_triangle(ab, bv, av)?;
        self.insert_triangle(bc, cv, bv)?;
        self.insert_triangle(ca, av, cv)?;
        debug!(%p, "split triangle into three");

        self.legalize(Some(v), [ab, bc, ca])?;
        Ok(v)
    }

    /// Splits edge `e` at point `p` (which lies on it within ε): each of the
    /// edge's one or two triangles becomes two. The halves of a constrained
    /// edge stay constrained.
    pub(crate) fn split_edge(
        &mut self,
        e: EdgeKey,
        p: Point,
    ) -> Result<VertexKey, TriangulationError> {
        let edge = self.try_edge(e)?.clone();
        let [a, b] = edge.vertices();
        let was_constrained = edge.is_constrained();
        let old_triangles: Vec<TriangleKey> = edge.triangles().to_vec();

        let mut apexes: Vec<VertexKey> = Vec::with_capacity(old_triangles.len());
        for &t in &old_triangles {
            apexes.push(self.opposite_vertex(t, e)?);
        }
        for t in old_triangles {
            self.remove_triangle(t)?;
        }
        self.remove_edge(e)?;

        let v = self.insert_vertex(p);
        let av = self.insert_edge(a, v)?;
        let vb = self.insert_edge(v, b)?;
        if was_constrained {
            self.set_constrained(av, true);
            self.set_constrained(vb, true);
        }

        let missing_rim =
            || TriangulationError::inconsistent("split quadrilateral is missing a rim edge");
        let mut seed: Vec<EdgeKey> = Vec::new();
        for k in apexes {
            let ak = self.edge_between(a, k).ok_or_else(missing_rim)?;
            let kb = self.edge_between(k, b).ok_or_else(missing_rim)?;
            let kv = self.insert_edge(k, v)?;
            self.insert_triangle(ak, kv, av)?;
            self.insert_triangle(kb, vb, kv)?;
            seed.push(ak);
            seed.push(kb);
        }
        debug!(%p, "split edge");

        self.legalize(Some(v), seed)?;
        Ok(v)
    }

    /// Attaches the exterior vertex `v` to the mesh through the best visible
    /// boundary edge, creating one triangle, then legalizes every edge
    /// around the new triangle's corners with `v` as focus.
    pub(crate) fn extend_mesh(&mut self, v: VertexKey) -> Result<(), TriangulationError> {
        let p = self.try_point(v)?;
        let target = self.best_visible_edge(p)?.ok_or_else(|| {
            TriangulationError::inconsistent("no boundary edge is visible from the exterior point")
        })?;
        let [a, b] = self.try_edge(target)?.vertices();
        let va = self.insert_edge(v, a)?;
        let vb = self.insert_edge(v, b)?;
        self.insert_triangle(target, vb, va)?;
        debug!(%p, "attached exterior point to boundary");

        let mut seed: Vec<EdgeKey> = Vec::new();
        for corner in [v, a, b] {
            seed.extend(self.try_vertex(corner)?.edges().iter().copied());
        }
        self.legalize(Some(v), seed)
    }
}
