/*!

A Routing decides, at each node a packet visits, the channel by which it continues.

The routing is asked once per hop through `route_packet`. It gets the network, the current load of the channels, the node where the packet is, and the packet itself. It answers `None` when the packet is already at its destination and otherwise a channel having the current node as an endpoint. Routings keep no state between calls; the load is read again at every decision.

see [`new_routing`](fn.new_routing.html) for documentation on the configuration syntax of predefined routings.

*/

pub mod greedy;
pub mod baseline;

use std::cell::RefCell;
use std::fmt::Debug;

use rand::rngs::StdRng;

use crate::config::ConfigurationValue;
use crate::error::Error;
use crate::network::{ChannelIndex,Network,Occupancy};
use crate::topology::{Shape,new_shape};
use crate::{match_object,source_location};
use crate::Plugs;

pub use self::greedy::{Greedy,GreedyMode,path_score};
pub use self::baseline::{AlwaysRight,ShortestPath};

///A packet in transit. Routings only look at its destination.
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub struct Packet
{
	pub identifier: usize,
	pub source: usize,
	pub destination: usize,
}

impl Packet
{
	pub fn new(identifier:usize, source:usize, destination:usize) -> Packet
	{
		Packet{
			identifier,
			source,
			destination,
		}
	}
}

///A routing decides the next channel of a packet.
pub trait Routing : Debug
{
	///The channel by which the packet at `current` continues, or `None` if `current` is its destination.
	///`rng` is only used to break ties.
	fn route_packet(&self, network:&dyn Network, occupancy:&dyn Occupancy, current:usize, packet:&Packet, rng:&RefCell<StdRng>) -> Result<Option<ChannelIndex>,Error>;
	///The shape the routing assumes for the network.
	fn shape(&self) -> &Shape;
}

///The argument of a builder function for `Routings`.
#[non_exhaustive]
#[derive(Debug)]
pub struct RoutingBuilderArgument<'a>
{
	///A ConfigurationValue::Object defining the routing.
	pub cv: &'a ConfigurationValue,
	///The user defined plugs. In case the routing needs to create elements.
	pub plugs: &'a Plugs,
}

impl<'a> RoutingBuilderArgument<'a>
{
	pub fn new(cv:&'a ConfigurationValue, plugs:&'a Plugs) -> RoutingBuilderArgument<'a>
	{
		RoutingBuilderArgument{
			cv,
			plugs,
		}
	}
}

/**Build a new routing.

## Greedy routings

Both take a `topology` field with the shape of the network, which gives the distance used to compare candidates.

```ignore
GreedyChannel{
	topology: Torus{sides:[4,4]},
}
```
Compares the channels at the current node by the distance from their far endpoint to the destination plus their occupancy.

```ignore
GreedyPath{
	topology: Star{hubs:1, spokes:8},
}
```
Compares the paths given by the network from the current node to the destination by their length plus the occupancy that would remain when reaching each channel.

## Baseline routings

```ignore
AlwaysRight{
	topology: Ring{k:8},
}
```
Only for rings. Always goes to the next address.

```ignore
ShortestPath{
	topology: Torus{sides:[4,4]},
}
```
A minimal route ignoring the load. In a torus it first corrects the x coordinate and then the y coordinate.

Any routing accepts a `legend_name` field, which is ignored.
**/
pub fn new_routing(arg:RoutingBuilderArgument) -> Result<Box<dyn Routing>,Error>
{
	let cv=arg.cv;
	let (cv_name,_cv_pairs)=cv.as_object()?;
	if let Some(builder) = arg.plugs.routings.get(cv_name)
	{
		return builder(arg);
	}
	match cv_name
	{
		"GreedyChannel" => Ok(Box::new(Greedy::new(arg,GreedyMode::Channel)?)),
		"GreedyPath" => Ok(Box::new(Greedy::new(arg,GreedyMode::Path)?)),
		"AlwaysRight" => Ok(Box::new(AlwaysRight::new(arg)?)),
		"ShortestPath" => Ok(Box::new(ShortestPath::new(arg)?)),
		_ => Err(Error::unknown_routing(source_location!(),cv_name.to_string())),
	}
}

///Read the mandatory `topology` field of an object named `name`.
fn read_topology(cv:&ConfigurationValue, name:&str) -> Result<Shape,Error>
{
	let mut shape=None;
	match_object!(cv,name,value,
		"topology" => shape=Some(new_shape(value)?),
	);
	shape.ok_or_else(||Error::ill_formed_configuration(source_location!(),cv.clone()).with_message(format!("There were no topology in {}",name)))
}
