//! Block names used by the default palette and configuration.

use super::Block;

pub const STONE: Block = Block::named("stone");
pub const STONE_BRICKS: Block = Block::named("stone_bricks");
pub const SMOOTH_STONE: Block = Block::named("smooth_stone");
pub const COBBLESTONE: Block = Block::named("cobblestone");
pub const BRICKS: Block = Block::named("bricks");
pub const GRAY_CONCRETE: Block = Block::named("gray_concrete");
pub const LIGHT_GRAY_CONCRETE: Block = Block::named("light_gray_concrete");
pub const WHITE_CONCRETE: Block = Block::named("white_concrete");
pub const BLACK_CONCRETE: Block = Block::named("black_concrete");
pub const RED_CONCRETE: Block = Block::named("red_concrete");
pub const ORANGE_TERRACOTTA: Block = Block::named("orange_terracotta");
pub const BROWN_TERRACOTTA: Block = Block::named("brown_terracotta");
pub const YELLOW_TERRACOTTA: Block = Block::named("yellow_terracotta");
pub const GREEN_TERRACOTTA: Block = Block::named("green_terracotta");
pub const BLUE_TERRACOTTA: Block = Block::named("blue_terracotta");
pub const SANDSTONE: Block = Block::named("sandstone");
pub const OAK_PLANKS: Block = Block::named("oak_planks");
pub const SPRUCE_PLANKS: Block = Block::named("spruce_planks");
pub const DEEPSLATE_TILES: Block = Block::named("deepslate_tiles");
pub const IRON_BLOCK: Block = Block::named("iron_block");
pub const COPPER_BLOCK: Block = Block::named("copper_block");
pub const QUARTZ_BLOCK: Block = Block::named("quartz_block");
pub const GLASS: Block = Block::named("glass");
pub const GLASS_PANE: Block = Block::named("glass_pane");
pub const GLOWSTONE: Block = Block::named("glowstone");
pub const SEA_LANTERN: Block = Block::named("sea_lantern");
pub const LANTERN: Block = Block::named("lantern");
pub const POLISHED_ANDESITE: Block = Block::named("polished_andesite");
pub const OAK_FENCE: Block = Block::named("oak_fence");
pub const STONE_BRICK_WALL: Block = Block::named("stone_brick_wall");
pub const WHITE_WOOL: Block = Block::named("white_wool");
