// src/level/geometry.rs

use std::io::{self, Cursor};

use log::debug;
use rayon::prelude::*;
use thiserror::Error;

use crate::bsp::{self, BoundingBox};
use crate::map::{Child, LineDef, Node, Sector, Seg, SideDef, Subsector, Vertex};

#[derive(Debug, Clone, Copy)]
pub enum ObjType {
    Vertices,
    Linedefs,
    Sidedefs,
    Sectors,
    Segs,
    Subsectors,
    Nodes,
}

/// Errors surfaced while populating a [`LevelGeometry`] from packed lump
/// buffers. Queries themselves never fail; a store that loaded without
/// error answers every query.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("lump {lump} is {actual} bytes, expected {expected}")]
    LumpSize {
        lump: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("lump read failed: {0}")]
    Io(#[from] io::Error),
}

/// The in-memory geometry of one level: flat entity arrays cross-linked by
/// plain indices, the way the packed map format stores them.
///
/// Lifecycle: create empty, populate each array once from its lump buffer
/// (single-threaded), then query read-only. A populated store is immutable,
/// so `&LevelGeometry` can be shared across threads and every query is
/// reentrant.
#[derive(Debug, Default)]
pub struct LevelGeometry {
    vertices: Vec<Vertex>,
    linedefs: Vec<LineDef>,
    sidedefs: Vec<SideDef>,
    sectors: Vec<Sector>,
    segs: Vec<Seg>,
    subsectors: Vec<Subsector>,
    nodes: Vec<Node>,
}

impl LevelGeometry {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // --- Lump-loading methods, one per entity array ---
    //
    // Each expects `data` to hold exactly `count` packed records in the
    // level format's little-endian layout.

    pub fn load_vertices(&mut self, count: usize, data: &[u8]) -> Result<(), GeometryError> {
        check_lump_size("VERTEXES", count, Vertex::LUMP_SIZE, data)?;
        let mut cursor = Cursor::new(data);
        let mut vertices = Vec::with_capacity(count);
        for _ in 0..count {
            vertices.push(Vertex::from_lump(&mut cursor)?);
        }
        debug!("Loaded {} vertices", count);
        self.vertices = vertices;
        Ok(())
    }

    pub fn load_linedefs(&mut self, count: usize, data: &[u8]) -> Result<(), GeometryError> {
        check_lump_size("LINEDEFS", count, LineDef::LUMP_SIZE, data)?;
        let mut cursor = Cursor::new(data);
        let mut linedefs = Vec::with_capacity(count);
        for _ in 0..count {
            linedefs.push(LineDef::from_lump(&mut cursor)?);
        }
        debug!("Loaded {} linedefs", count);
        self.linedefs = linedefs;
        Ok(())
    }

    pub fn load_sidedefs(&mut self, count: usize, data: &[u8]) -> Result<(), GeometryError> {
        check_lump_size("SIDEDEFS", count, SideDef::LUMP_SIZE, data)?;
        let mut cursor = Cursor::new(data);
        let mut sidedefs = Vec::with_capacity(count);
        for _ in 0..count {
            sidedefs.push(SideDef::from_lump(&mut cursor)?);
        }
        debug!("Loaded {} sidedefs", count);
        self.sidedefs = sidedefs;
        Ok(())
    }

    pub fn load_sectors(&mut self, count: usize, data: &[u8]) -> Result<(), GeometryError> {
        check_lump_size("SECTORS", count, Sector::LUMP_SIZE, data)?;
        let mut cursor = Cursor::new(data);
        let mut sectors = Vec::with_capacity(count);
        for _ in 0..count {
            sectors.push(Sector::from_lump(&mut cursor)?);
        }
        debug!("Loaded {} sectors", count);
        self.sectors = sectors;
        Ok(())
    }

    pub fn load_segs(&mut self, count: usize, data: &[u8]) -> Result<(), GeometryError> {
        check_lump_size("SEGS", count, Seg::LUMP_SIZE, data)?;
        let mut cursor = Cursor::new(data);
        let mut segs = Vec::with_capacity(count);
        for _ in 0..count {
            segs.push(Seg::from_lump(&mut cursor)?);
        }
        debug!("Loaded {} segs", count);
        self.segs = segs;
        Ok(())
    }

    pub fn load_subsectors(&mut self, count: usize, data: &[u8]) -> Result<(), GeometryError> {
        check_lump_size("SSECTORS", count, Subsector::LUMP_SIZE, data)?;
        let mut cursor = Cursor::new(data);
        let mut subsectors = Vec::with_capacity(count);
        for _ in 0..count {
            subsectors.push(Subsector::from_lump(&mut cursor)?);
        }
        debug!("Loaded {} subsectors", count);
        self.subsectors = subsectors;
        Ok(())
    }

    pub fn load_nodes(&mut self, count: usize, data: &[u8]) -> Result<(), GeometryError> {
        check_lump_size("NODES", count, Node::LUMP_SIZE, data)?;
        let mut cursor = Cursor::new(data);
        let mut nodes = Vec::with_capacity(count);
        for _ in 0..count {
            nodes.push(Node::from_lump(&mut cursor)?);
        }
        debug!("Loaded {} nodes", count);
        self.nodes = nodes;
        Ok(())
    }

    // --- Accessors ---

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }
    pub fn linedefs(&self) -> &[LineDef] {
        &self.linedefs
    }
    pub fn sidedefs(&self) -> &[SideDef] {
        &self.sidedefs
    }
    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }
    pub fn segs(&self) -> &[Seg] {
        &self.segs
    }
    pub fn subsectors(&self) -> &[Subsector] {
        &self.subsectors
    }
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn num_objects(&self, obj_type: ObjType) -> usize {
        match obj_type {
            ObjType::Vertices => self.vertices.len(),
            ObjType::Linedefs => self.linedefs.len(),
            ObjType::Sidedefs => self.sidedefs.len(),
            ObjType::Sectors => self.sectors.len(),
            ObjType::Segs => self.segs.len(),
            ObjType::Subsectors => self.subsectors.len(),
            ObjType::Nodes => self.nodes.len(),
        }
    }

    // --- Spatial queries ---

    /// Returns the index of the subsector containing the point (x, y), by
    /// descending the node tree from the root and following the child on
    /// the point's side of each partition.
    ///
    /// # Panics
    ///
    /// Panics if the store holds no nodes, or if a child reference points
    /// outside the node/subsector arrays (corrupt geometry).
    pub fn point_in_subsector(&self, x: i16, y: i16) -> usize {
        // The node array's last entry is the root of the tree.
        let mut child = Child::Node((self.nodes.len() - 1) as u16);
        loop {
            match child {
                Child::Subsector(index) => return index as usize,
                Child::Node(index) => {
                    let node = &self.nodes[index as usize];
                    child = node.children[bsp::point_on_node_side(x, y, node)];
                }
            }
        }
    }

    /// Returns the index of the sector containing the point (x, y): the
    /// containing subsector's first seg leads through its parent linedef
    /// and facing sidedef to the sector.
    ///
    /// Returns `None` when the linedef has no sidedef on the seg's side
    /// (malformed geometry rather than a query failure).
    pub fn sector_at(&self, x: i16, y: i16) -> Option<usize> {
        let subsector = &self.subsectors[self.point_in_subsector(x, y)];
        let seg = &self.segs[subsector.first_seg];
        let linedef = &self.linedefs[seg.linedef];
        let sidedef = linedef.sidedef_for(seg.side)?;
        Some(self.sidedefs[sidedef].sector)
    }

    // --- Geometry helpers ---

    /// Integer midpoint of a linedef, truncated toward the start vertex.
    pub fn line_midpoint(&self, line_index: usize) -> (i16, i16) {
        let line = &self.linedefs[line_index];
        midpoint(&self.vertices[line.start], &self.vertices[line.end])
    }

    /// Integer midpoint of a seg, truncated toward the start vertex.
    pub fn seg_midpoint(&self, seg_index: usize) -> (i16, i16) {
        let seg = &self.segs[seg_index];
        midpoint(&self.vertices[seg.start], &self.vertices[seg.end])
    }

    /// The bounding box of all vertices in the level.
    pub fn bounds(&self) -> BoundingBox {
        let mut bbox = BoundingBox::new_empty();
        for vertex in &self.vertices {
            bbox.expand_point(vertex.x, vertex.y);
        }
        bbox
    }

    /// Computes a checksum over all geometry arrays.
    pub fn checksum(&self) -> u32 {
        let mut checksum = 0u32;
        checksum = checksum.wrapping_add(
            self.vertices
                .par_iter()
                .map(|vertex| {
                    let mut crc = 0u32;
                    checksum_vertex(&mut crc, vertex);
                    crc
                })
                .sum::<u32>(),
        );
        checksum = checksum.wrapping_add(
            self.linedefs
                .par_iter()
                .map(|line| {
                    let mut crc = 0u32;
                    checksum_linedef(&mut crc, line);
                    crc
                })
                .sum::<u32>(),
        );
        checksum = checksum.wrapping_add(
            self.sidedefs
                .par_iter()
                .map(|sidedef| {
                    let mut crc = 0u32;
                    checksum_sidedef(&mut crc, sidedef);
                    crc
                })
                .sum::<u32>(),
        );
        checksum = checksum.wrapping_add(
            self.sectors
                .par_iter()
                .map(|sector| {
                    let mut crc = 0u32;
                    checksum_sector(&mut crc, sector);
                    crc
                })
                .sum::<u32>(),
        );
        checksum = checksum.wrapping_add(
            self.segs
                .par_iter()
                .map(|seg| {
                    let mut crc = 0u32;
                    checksum_seg(&mut crc, seg);
                    crc
                })
                .sum::<u32>(),
        );
        checksum = checksum.wrapping_add(
            self.subsectors
                .par_iter()
                .map(|subsector| {
                    let mut crc = 0u32;
                    checksum_subsector(&mut crc, subsector);
                    crc
                })
                .sum::<u32>(),
        );
        checksum = checksum.wrapping_add(
            self.nodes
                .par_iter()
                .map(|node| {
                    let mut crc = 0u32;
                    checksum_node(&mut crc, node);
                    crc
                })
                .sum::<u32>(),
        );
        checksum
    }
}

fn check_lump_size(
    lump: &'static str,
    count: usize,
    record_size: usize,
    data: &[u8],
) -> Result<(), GeometryError> {
    let expected = count * record_size;
    if data.len() != expected {
        return Err(GeometryError::LumpSize {
            lump,
            expected,
            actual: data.len(),
        });
    }
    Ok(())
}

fn midpoint(start: &Vertex, end: &Vertex) -> (i16, i16) {
    let x = i32::from(start.x) + (i32::from(end.x) - i32::from(start.x)) / 2;
    let y = i32::from(start.y) + (i32::from(end.y) - i32::from(start.y)) / 2;
    (x as i16, y as i16)
}

// --- Checksum helper functions ---

fn add_crc(crc: &mut u32, value: i32) {
    *crc = crc.wrapping_add(value as u32);
}

fn checksum_vertex(crc: &mut u32, vertex: &Vertex) {
    add_crc(crc, i32::from(vertex.x));
    add_crc(crc, i32::from(vertex.y));
}

fn checksum_linedef(crc: &mut u32, linedef: &LineDef) {
    add_crc(crc, linedef.start as i32);
    add_crc(crc, linedef.end as i32);
    add_crc(crc, i32::from(linedef.flags));
    add_crc(crc, i32::from(linedef.special));
    add_crc(crc, i32::from(linedef.tag));
    add_crc(crc, linedef.right.map_or(-1, |s| s as i32));
    add_crc(crc, linedef.left.map_or(-1, |s| s as i32));
}

fn checksum_sidedef(crc: &mut u32, sidedef: &SideDef) {
    add_crc(crc, i32::from(sidedef.x_offset));
    add_crc(crc, i32::from(sidedef.y_offset));
    for byte in sidedef.upper_tex.as_bytes() {
        add_crc(crc, i32::from(*byte));
    }
    for byte in sidedef.lower_tex.as_bytes() {
        add_crc(crc, i32::from(*byte));
    }
    for byte in sidedef.mid_tex.as_bytes() {
        add_crc(crc, i32::from(*byte));
    }
    add_crc(crc, sidedef.sector as i32);
}

fn checksum_sector(crc: &mut u32, sector: &Sector) {
    add_crc(crc, i32::from(sector.floor_height));
    add_crc(crc, i32::from(sector.ceiling_height));
    add_crc(crc, i32::from(sector.light));
    add_crc(crc, i32::from(sector.special));
    add_crc(crc, i32::from(sector.tag));
    for byte in sector.floor_tex.as_bytes() {
        add_crc(crc, i32::from(*byte));
    }
    for byte in sector.ceiling_tex.as_bytes() {
        add_crc(crc, i32::from(*byte));
    }
}

fn checksum_seg(crc: &mut u32, seg: &Seg) {
    add_crc(crc, seg.start as i32);
    add_crc(crc, seg.end as i32);
    add_crc(crc, i32::from(seg.angle));
    add_crc(crc, seg.linedef as i32);
    add_crc(crc, i32::from(seg.side));
    add_crc(crc, i32::from(seg.offset));
}

fn checksum_subsector(crc: &mut u32, subsector: &Subsector) {
    add_crc(crc, subsector.seg_count as i32);
    add_crc(crc, subsector.first_seg as i32);
}

fn checksum_node(crc: &mut u32, node: &Node) {
    add_crc(crc, i32::from(node.x));
    add_crc(crc, i32::from(node.y));
    add_crc(crc, i32::from(node.dx));
    add_crc(crc, i32::from(node.dy));
    for bbox in &node.bbox {
        add_crc(crc, i32::from(bbox.left));
        add_crc(crc, i32::from(bbox.top));
        add_crc(crc, i32::from(bbox.right));
        add_crc(crc, i32::from(bbox.bottom));
    }
    for child in &node.children {
        checksum_child(crc, child);
    }
}

fn checksum_child(crc: &mut u32, child: &Child) {
    match child {
        Child::Node(index) => add_crc(crc, i32::from(*index)),
        Child::Subsector(index) => add_crc(crc, i32::from(*index) | 0x8000),
    }
}
