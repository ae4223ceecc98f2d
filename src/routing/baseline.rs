/*!

Routings that ignore the load, to compare the greedy ones against.

*/

use std::cell::RefCell;

use rand::rngs::StdRng;
use rand::Rng;
use tracing::debug;

use super::{Packet,Routing,RoutingBuilderArgument,read_topology};
use crate::error::Error;
use crate::network::{ChannelIndex,Network,Occupancy};
use crate::source_location;
use crate::topology::Shape;
use crate::topology::cartesian::ring_offset;
use crate::topology::star::count_hubs;

///The channel from `current` to `next`, which must exist.
fn channel_to(network:&dyn Network, current:usize, next:usize) -> Result<ChannelIndex,Error>
{
	network.channel_between(current,next)?.ok_or_else(||Error::no_path(source_location!(),current,next).with_message(format!("there is no channel from {} to {}",current,next)))
}

///The neighbour one step along the shorter arc from `a` to `b` in a cycle of `k`.
fn ring_step(a:usize, b:usize, k:usize) -> usize
{
	if ring_offset(a,b,k)>0 { (a+1)%k } else { (a+k-1)%k }
}

///Always go to the next address of a ring.
#[derive(Debug)]
pub struct AlwaysRight
{
	shape: Shape,
	k: usize,
}

impl AlwaysRight
{
	pub fn new(arg:RoutingBuilderArgument) -> Result<AlwaysRight,Error>
	{
		AlwaysRight::with_shape(read_topology(arg.cv,"AlwaysRight")?)
	}
	pub fn with_shape(shape:Shape) -> Result<AlwaysRight,Error>
	{
		let k=match shape
		{
			Shape::Ring{k} => k,
			_ => return Err(Error::invalid_shape(source_location!(),format!("AlwaysRight only works on rings, not on a {}",shape.name()))),
		};
		Ok(AlwaysRight{shape,k})
	}
}

impl Routing for AlwaysRight
{
	fn route_packet(&self, network:&dyn Network, _occupancy:&dyn Occupancy, current:usize, packet:&Packet, _rng:&RefCell<StdRng>) -> Result<Option<ChannelIndex>,Error>
	{
		self.shape.check_network(network)?;
		network.check_address(current)?;
		network.check_address(packet.destination)?;
		if current==packet.destination
		{
			return Ok(None);
		}
		Ok(Some(channel_to(network,current,(current+1)%self.k)?))
	}
	fn shape(&self) -> &Shape
	{
		&self.shape
	}
}

///A minimal route without looking at the load.
///* Ring: along the shorter arc, increasing on ties.
///* Torus: the x coordinate first, then the y coordinate, each as in a ring.
///* Star: directly when a hub is involved, otherwise to a random hub.
#[derive(Debug)]
pub struct ShortestPath
{
	shape: Shape,
}

impl ShortestPath
{
	pub fn new(arg:RoutingBuilderArgument) -> Result<ShortestPath,Error>
	{
		Ok(ShortestPath::with_shape(read_topology(arg.cv,"ShortestPath")?))
	}
	pub fn with_shape(shape:Shape) -> ShortestPath
	{
		ShortestPath{
			shape,
		}
	}
}

impl Routing for ShortestPath
{
	fn route_packet(&self, network:&dyn Network, _occupancy:&dyn Occupancy, current:usize, packet:&Packet, rng:&RefCell<StdRng>) -> Result<Option<ChannelIndex>,Error>
	{
		self.shape.check_network(network)?;
		network.check_address(current)?;
		network.check_address(packet.destination)?;
		let destination=packet.destination;
		if current==destination
		{
			return Ok(None);
		}
		let channel=match &self.shape
		{
			&Shape::Ring{k} => channel_to(network,current,ring_step(current,destination,k))?,
			&Shape::Torus{ref cartesian_data} =>
			{
				let [x,y]=cartesian_data.coordinates(current)?;
				let [target_x,target_y]=cartesian_data.coordinates(destination)?;
				let next=if x!=target_x
				{
					[ring_step(x,target_x,cartesian_data.sides[0]),y]
				}
				else
				{
					[x,ring_step(y,target_y,cartesian_data.sides[1])]
				};
				channel_to(network,current,cartesian_data.pack(next))?
			},
			&Shape::Star{..} =>
			{
				if network.is_hub(current)? || network.is_hub(destination)?
				{
					channel_to(network,current,destination)?
				}
				else
				{
					let mut towards_hubs=vec![];
					for &channel in network.channels_at(current)?
					{
						if network.is_hub(network.far_endpoint(channel,current)?)?
						{
							towards_hubs.push(channel);
						}
					}
					if towards_hubs.is_empty()
					{
						let hubs=count_hubs(network)?;
						return Err(Error::no_path(source_location!(),current,destination).with_message(format!("the spoke {} is not linked to any of the {} hubs",current,hubs)));
					}
					let index=rng.borrow_mut().gen_range(0..towards_hubs.len());
					towards_hubs[index]
				}
			},
		};
		debug!(packet=packet.identifier,current,destination,channel,"shortest path decision");
		Ok(Some(channel))
	}
	fn shape(&self) -> &Shape
	{
		&self.shape
	}
}
