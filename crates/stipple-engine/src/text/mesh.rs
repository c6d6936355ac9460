use bytemuck::{Pod, Zeroable};
use stipple_bmfont::FontDescriptor;

use crate::coords::Vec2;

use super::layout::LayoutResult;

// ── vertex ────────────────────────────────────────────────────────────────

/// Vertex layout (20 bytes):
///
///  offset  0  position  [f32; 2]   loc 0
///  offset  8  uv        [f32; 2]   loc 1
///  offset 16  page      u32        loc 2
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct GlyphVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
    /// Atlas page, for multi-page fonts bound as a texture array.
    pub page: u32,
}

impl GlyphVertex {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x2, // position
        1 => Float32x2, // uv
        2 => Uint32     // page
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GlyphVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Per-quad index pattern over the BL, TL, TR, BR corners.
const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

// ── options ───────────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct MeshOptions {
    /// Atlas size in pixels. `None` = the font's `scaleW` / `scaleH`.
    pub atlas_size: Option<(u32, u32)>,
    /// Flip V for APIs whose texture origin is bottom-left.
    pub flip_y: bool,
    /// Centre the block about the origin.
    pub center: bool,
}

// ── mesh ──────────────────────────────────────────────────────────────────

/// CPU-side glyph geometry: one textured quad per positioned glyph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextMesh {
    pub vertices: Vec<GlyphVertex>,
    pub indices: Vec<u32>,
}

impl TextMesh {
    /// Builds quads for every glyph in `layout`.
    ///
    /// `atlas_size` falls back to `font_atlas` (normally the font's
    /// `scaleW` / `scaleH`); a zero dimension is treated as 1 so UVs stay
    /// finite.
    pub fn build(layout: &LayoutResult, font_atlas: (u32, u32), options: &MeshOptions) -> Self {
        let (tex_w, tex_h) = options.atlas_size.unwrap_or(font_atlas);
        let tex_w = tex_w.max(1) as f32;
        let tex_h = tex_h.max(1) as f32;

        let shift = if options.center {
            Vec2::new(-layout.width / 2.0, layout.height / 2.0)
        } else {
            Vec2::new(0.0, 0.0)
        };

        let mut vertices = Vec::with_capacity(layout.glyphs.len() * 4);
        let mut indices = Vec::with_capacity(layout.glyphs.len() * 6);

        for glyph in &layout.glyphs {
            let bitmap = &glyph.data;
            let quad = glyph.quad().translate(shift);
            let (x0, y0) = (quad.min().x, quad.min().y);
            let (x1, y1) = (quad.max().x, quad.max().y);

            let u0 = bitmap.x as f32 / tex_w;
            let u1 = (bitmap.x + bitmap.width) as f32 / tex_w;
            let (v_top, v_bottom) = if options.flip_y {
                (
                    (tex_h - bitmap.y as f32) / tex_h,
                    (tex_h - (bitmap.y + bitmap.height) as f32) / tex_h,
                )
            } else {
                (bitmap.y as f32 / tex_h, (bitmap.y + bitmap.height) as f32 / tex_h)
            };

            let base = vertices.len() as u32;
            let page = bitmap.page;
            vertices.extend_from_slice(&[
                GlyphVertex { position: [x0, y0], uv: [u0, v_top], page },    // BL
                GlyphVertex { position: [x0, y1], uv: [u0, v_bottom], page }, // TL
                GlyphVertex { position: [x1, y1], uv: [u1, v_bottom], page }, // TR
                GlyphVertex { position: [x1, y0], uv: [u1, v_top], page },    // BR
            ]);
            indices.extend(QUAD_INDICES.iter().map(|i| base + i));
        }

        Self { vertices, indices }
    }

    /// [`build`](Self::build) using the atlas size recorded in `font`.
    pub fn for_font(layout: &LayoutResult, font: &FontDescriptor, options: &MeshOptions) -> Self {
        let common = font.common();
        Self::build(layout, (common.scale_w, common.scale_h), options)
    }

    #[inline]
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Raw vertex bytes for a `wgpu::Buffer` upload.
    #[inline]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    #[inline]
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::layout::PositionedGlyph;
    use stipple_bmfont::GlyphRecord;

    fn glyph(x: f32, y: f32) -> PositionedGlyph {
        PositionedGlyph {
            position: Vec2::new(x, y),
            data: GlyphRecord {
                id: 'A' as u32,
                x: 32,
                y: 64,
                width: 16,
                height: 32,
                xoffset: 2,
                yoffset: 4,
                xadvance: 18,
                page: 1,
            },
            index: 0,
            line: 0,
        }
    }

    fn layout(glyphs: Vec<PositionedGlyph>) -> LayoutResult {
        LayoutResult { width: 40.0, height: 20.0, glyphs, ..LayoutResult::default() }
    }

    #[test]
    fn vertex_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<GlyphVertex>(), 20);
        assert_eq!(GlyphVertex::layout().array_stride, 20);
    }

    #[test]
    fn one_quad_per_glyph() {
        let mesh = TextMesh::build(
            &layout(vec![glyph(0.0, 0.0), glyph(18.0, 0.0)]),
            (128, 128),
            &MeshOptions::default(),
        );
        assert_eq!(mesh.quad_count(), 2);
        assert_eq!(mesh.indices, [0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7]);
        assert_eq!(mesh.vertex_bytes().len(), 8 * 20);
        assert_eq!(mesh.index_bytes().len(), 12 * 4);
    }

    #[test]
    fn positions_include_draw_offsets() {
        let mesh = TextMesh::build(&layout(vec![glyph(10.0, -20.0)]), (128, 128), &MeshOptions::default());
        let p: Vec<[f32; 2]> = mesh.vertices.iter().map(|v| v.position).collect();
        assert_eq!(p, [[12.0, -16.0], [12.0, 16.0], [28.0, 16.0], [28.0, -16.0]]);
        assert!(mesh.vertices.iter().all(|v| v.page == 1));
    }

    #[test]
    fn uvs_normalize_by_atlas() {
        let mesh = TextMesh::build(&layout(vec![glyph(0.0, 0.0)]), (128, 128), &MeshOptions::default());
        assert_eq!(mesh.vertices[0].uv, [0.25, 0.5]);
        assert_eq!(mesh.vertices[2].uv, [0.375, 0.75]);
    }

    #[test]
    fn flip_y_mirrors_v() {
        let opts = MeshOptions { flip_y: true, ..MeshOptions::default() };
        let mesh = TextMesh::build(&layout(vec![glyph(0.0, 0.0)]), (128, 128), &opts);
        assert_eq!(mesh.vertices[0].uv, [0.25, 0.5]);
        assert_eq!(mesh.vertices[1].uv, [0.25, 0.25]);
    }

    #[test]
    fn atlas_override_wins() {
        let opts = MeshOptions { atlas_size: Some((256, 256)), ..MeshOptions::default() };
        let mesh = TextMesh::build(&layout(vec![glyph(0.0, 0.0)]), (128, 128), &opts);
        assert_eq!(mesh.vertices[0].uv, [0.125, 0.25]);
    }

    #[test]
    fn center_shifts_block_about_origin() {
        let opts = MeshOptions { center: true, ..MeshOptions::default() };
        let mesh = TextMesh::build(&layout(vec![glyph(0.0, -20.0)]), (128, 128), &opts);
        // x - 40/2, y + 20/2
        assert_eq!(mesh.vertices[0].position, [-18.0, -6.0]);
    }

    #[test]
    fn for_font_reads_scale_from_common() {
        use stipple_bmfont::CommonMetrics;
        let font = FontDescriptor::new(CommonMetrics::new(10.0, 8.0).with_atlas_size(64, 256), [], []);
        let mesh = TextMesh::for_font(&layout(vec![glyph(0.0, 0.0)]), &font, &MeshOptions::default());
        assert_eq!(mesh.vertices[0].uv, [0.5, 0.25]);
    }

    #[test]
    fn empty_layout_builds_empty_mesh() {
        let mesh = TextMesh::build(&LayoutResult::default(), (0, 0), &MeshOptions::default());
        assert!(mesh.is_empty());
        assert!(mesh.indices.is_empty());
    }
}
